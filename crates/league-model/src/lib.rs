// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Declarative description of the league schema: which GraphQL types exist, which tables back
//! them, and how their relations join. The resolver derives both the GraphQL schema and the SQL
//! it issues from these declarations.

pub mod mutation;
pub mod query;
pub mod sports;
pub mod subsystem;
pub mod types;

pub use indexmap::IndexMap;

/// Validated argument values keyed by argument name.
pub type Arguments = IndexMap<String, async_graphql_value::ConstValue>;
