// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use league_model::{sports::sports_subsystem, subsystem::LeagueSubsystem};
use serde_json::json;

use crate::{
    QueryResponse,
    introspection::definition::schema::Schema,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};

/// Exposes the league schema and answers `hello`, `team` (echoing the `id` argument) and fails
/// every other field.
pub(crate) struct LeagueSchemaResolver(LeagueSubsystem);

impl LeagueSchemaResolver {
    pub(crate) fn new() -> Self {
        Self(sports_subsystem())
    }
}

#[async_trait]
impl SubsystemGraphQLResolver for LeagueSchemaResolver {
    fn id(&self) -> &'static str {
        "league-schema"
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        _operation_type: OperationType,
    ) -> Result<Option<QueryResponse>, SubsystemResolutionError> {
        match field.name.as_str() {
            "hello" => Ok(Some(QueryResponse::json(json!("Hello world!")))),
            "team" => {
                let id = field
                    .arguments
                    .get("id")
                    .cloned()
                    .map(|id| id.into_json().unwrap())
                    .unwrap_or_default();
                Ok(Some(QueryResponse::json(json!({ "id": id }))))
            }
            name if name.starts_with("__") => Ok(None),
            _ => Err(SubsystemResolutionError::UserDisplayError(
                "Database unavailable".to_string(),
            )),
        }
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.0.schema_queries()
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        self.0.schema_mutations()
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        self.0.schema_types()
    }
}

pub(crate) fn league_resolvers() -> Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> {
    vec![Arc::new(LeagueSchemaResolver::new())]
}

pub(crate) fn league_schema_with(allow_mutations: bool) -> Schema {
    Schema::new_from_resolvers(&league_resolvers(), allow_mutations)
}

pub(crate) fn league_schema() -> Schema {
    league_schema_with(true)
}
