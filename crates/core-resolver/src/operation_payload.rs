// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::{Map, Value};

/// The GraphQL request: `{"query": ..., "variables": ..., "operationName": ...}`.
#[derive(Debug, PartialEq)]
pub struct OperationsPayload {
    pub operation_name: Option<String>,
    pub query: Option<String>,
    pub variables: Option<Map<String, Value>>,
}

impl OperationsPayload {
    /// Parse a POST body or the query-string parameters of a GET request. In the latter,
    /// `variables` arrives as a JSON-encoded string.
    pub fn from_json(json: Value) -> Result<Self, serde_json::Error> {
        #[derive(Debug, Deserialize)]
        struct RawOperationsPayload {
            #[serde(rename = "operationName")]
            operation_name: Option<String>,
            query: Option<String>,
            variables: Option<Value>,
        }

        let raw_payload = serde_json::from_value::<RawOperationsPayload>(json)?;

        let variables = match raw_payload.variables {
            None | Some(Value::Null) => None,
            Some(Value::Object(variables)) => Some(variables),
            Some(Value::String(encoded)) if encoded.trim().is_empty() => None,
            Some(Value::String(encoded)) => Some(serde_json::from_str(&encoded)?),
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "variables must be an object, got {other}"
                )));
            }
        };

        let operation_name = raw_payload.operation_name.filter(|name| !name.is_empty());

        Ok(OperationsPayload {
            operation_name,
            query: raw_payload.query,
            variables,
        })
    }
}
