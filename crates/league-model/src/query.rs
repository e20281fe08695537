// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::Type;
use core_model::{
    primitive_type::PrimitiveType,
    type_normalization::{Operation, Parameter, TypeModifier, modified_type},
};
use league_sql::ConcretePredicate;

use crate::{Arguments, types::Cardinality};

/// An argument such as `id: Int!`.
#[derive(Debug, Clone)]
pub struct ArgumentParameter {
    pub name: String,
    pub typ: PrimitiveType,
    pub modifier: TypeModifier,
}

impl ArgumentParameter {
    pub fn required(name: &str, typ: PrimitiveType) -> Self {
        Self {
            name: name.to_string(),
            typ,
            modifier: TypeModifier::NonNull,
        }
    }
}

impl Parameter for ArgumentParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn typ(&self) -> Type {
        modified_type(self.typ.name(), self.modifier)
    }
}

/// Produces the `WHERE` predicate of a root query over the root table alias.
pub type RootFilterFn = fn(table_alias: &str, arguments: &Arguments) -> ConcretePredicate;

/// A query answered from the database, such as `players` or `team(id: Int!)`.
#[derive(Debug, Clone)]
pub struct EntityQuery {
    pub name: String,
    pub entity_type: String,
    pub cardinality: Cardinality,
    pub parameters: Vec<ArgumentParameter>,
    pub filter: Option<RootFilterFn>,
}

impl Operation for EntityQuery {
    type Param = ArgumentParameter;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ArgumentParameter] {
        &self.parameters
    }

    fn return_type(&self) -> Type {
        modified_type(&self.entity_type, self.cardinality.type_modifier())
    }
}

/// A query with a fixed answer, such as `hello`.
#[derive(Debug, Clone)]
pub struct StaticQuery {
    pub name: String,
    pub value: String,
}

impl Operation for StaticQuery {
    type Param = ArgumentParameter;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ArgumentParameter] {
        &[]
    }

    fn return_type(&self) -> Type {
        modified_type(PrimitiveType::String.name(), TypeModifier::Optional)
    }
}
