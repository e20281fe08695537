// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntBits {
    _16,
    _32,
    _64,
}

/// How a column's values are decoded from result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalColumnType {
    Int { bits: IntBits },
    String,
}
