// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value as JsonValue;

/// The value produced for one root field.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub body: JsonValue,
}

impl QueryResponse {
    pub fn json(body: JsonValue) -> Self {
        Self { body }
    }
}
