// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, ObjectType, TypeDefinition, TypeKind};
use core_model::{
    primitive_type::PrimitiveType,
    type_normalization::{
        TypeDefinitionProvider, TypeModifier, default_positioned, default_positioned_name,
        modified_type,
    },
};
use league_sql::{ConcretePredicate, PhysicalColumnType};

use crate::{Arguments, subsystem::LeagueSubsystem};

/// An object type backed by a table, such as `Player` backed by `player`.
#[derive(Debug, Clone)]
pub struct EntityType {
    pub name: String,
    pub table_name: String,
    /// Column that identifies a row. Always selected so that joined rows can be grouped back.
    pub unique_key: String,
    pub unique_key_type: PhysicalColumnType,
    pub fields: Vec<EntityField>,
}

#[derive(Debug, Clone)]
pub struct EntityField {
    pub name: String,
    pub kind: EntityFieldKind,
}

#[derive(Debug, Clone)]
pub enum EntityFieldKind {
    Column(ColumnField),
    Relation(RelationField),
}

#[derive(Debug, Clone)]
pub struct ColumnField {
    pub column_name: String,
    pub column_type: PhysicalColumnType,
    /// May differ from the column type: `Player.id` is an integer column exposed as `String`.
    pub graphql_type: PrimitiveType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// `Team`: first matching row or null
    One,
    /// `[Team]`: all matching rows
    Many,
}

impl Cardinality {
    pub fn type_modifier(&self) -> TypeModifier {
        match self {
            Cardinality::One => TypeModifier::Optional,
            Cardinality::Many => TypeModifier::List,
        }
    }
}

/// Produces the `ON` predicate joining the parent alias to the child alias.
pub type JoinPredicateFn =
    fn(parent_alias: &str, child_alias: &str, arguments: &Arguments) -> ConcretePredicate;

#[derive(Debug, Clone)]
pub struct RelationField {
    pub target_type: String,
    pub cardinality: Cardinality,
    pub join: JoinPredicateFn,
}

impl EntityType {
    pub fn field(&self, name: &str) -> Option<&EntityField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl EntityField {
    fn return_type_name(&self) -> &str {
        match &self.kind {
            EntityFieldKind::Column(column) => column.graphql_type.name(),
            EntityFieldKind::Relation(relation) => &relation.target_type,
        }
    }

    fn field_definition(&self) -> FieldDefinition {
        let modifier = match &self.kind {
            EntityFieldKind::Column(_) => TypeModifier::Optional,
            EntityFieldKind::Relation(relation) => relation.cardinality.type_modifier(),
        };

        FieldDefinition {
            description: None,
            name: default_positioned_name(&self.name),
            arguments: vec![],
            ty: default_positioned(modified_type(self.return_type_name(), modifier)),
            directives: vec![],
        }
    }
}

impl TypeDefinitionProvider<LeagueSubsystem> for EntityType {
    fn type_definition(&self, _system: &LeagueSubsystem) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields: self
                    .fields
                    .iter()
                    .map(|field| default_positioned(field.field_definition()))
                    .collect(),
            }),
        }
    }
}
