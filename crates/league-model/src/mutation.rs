// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::Type;
use core_model::type_normalization::{Operation, TypeModifier, modified_type};
use league_sql::PhysicalColumnType;

use crate::query::ArgumentParameter;

/// A mutation inserting one row and returning the created entity, such as
/// `player(first_name: String!, last_name: String!, team_id: Int!): Player`.
#[derive(Debug, Clone)]
pub struct CreateMutation {
    pub name: String,
    pub entity_type: String,
    pub parameters: Vec<ArgumentParameter>,
    /// One entry per parameter, in insertion order
    pub columns: Vec<InsertColumn>,
    /// Reported instead of the database error when the insert fails
    pub error_message: String,
}

/// Maps an argument to the column it populates.
#[derive(Debug, Clone)]
pub struct InsertColumn {
    pub argument: String,
    pub column_name: String,
    pub column_type: PhysicalColumnType,
}

impl Operation for CreateMutation {
    type Param = ArgumentParameter;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ArgumentParameter] {
        &self.parameters
    }

    fn return_type(&self) -> Type {
        modified_type(&self.entity_type, TypeModifier::Optional)
    }
}
