// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use async_graphql_parser::types::{TypeDefinition, TypeKind};

use crate::type_normalization::default_positioned_name;

/// The built-in scalars exposed by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    String,
    Boolean,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 3] = [
        PrimitiveType::Int,
        PrimitiveType::String,
        PrimitiveType::Boolean,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "Int",
            PrimitiveType::String => "String",
            PrimitiveType::Boolean => "Boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pt| pt.name() == name)
    }

    pub fn is_primitive(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    pub fn type_definition(&self) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(self.name()),
            directives: vec![],
            kind: TypeKind::Scalar,
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
