// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, TypeDefinition};
use core_model::type_normalization::{FieldDefinitionProvider, TypeDefinitionProvider};

use crate::{
    mutation::CreateMutation,
    query::{EntityQuery, StaticQuery},
    types::EntityType,
};

/// The registry of entity types and root operations.
#[derive(Debug, Clone, Default)]
pub struct LeagueSubsystem {
    pub entity_types: Vec<EntityType>,
    pub static_queries: Vec<StaticQuery>,
    pub queries: Vec<EntityQuery>,
    pub mutations: Vec<CreateMutation>,
}

impl LeagueSubsystem {
    pub fn get_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|typ| typ.name == name)
    }

    pub fn get_static_query(&self, name: &str) -> Option<&StaticQuery> {
        self.static_queries.iter().find(|query| query.name == name)
    }

    pub fn get_query(&self, name: &str) -> Option<&EntityQuery> {
        self.queries.iter().find(|query| query.name == name)
    }

    pub fn get_mutation(&self, name: &str) -> Option<&CreateMutation> {
        self.mutations.iter().find(|mutation| mutation.name == name)
    }

    pub fn schema_types(&self) -> Vec<TypeDefinition> {
        self.entity_types
            .iter()
            .map(|typ| typ.type_definition(self))
            .collect()
    }

    pub fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.static_queries
            .iter()
            .map(|query| query.field_definition(self))
            .chain(self.queries.iter().map(|query| query.field_definition(self)))
            .collect()
    }

    pub fn schema_mutations(&self) -> Vec<FieldDefinition> {
        self.mutations
            .iter()
            .map(|mutation| mutation.field_definition(self))
            .collect()
    }
}
