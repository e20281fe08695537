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
use core_resolver::{
    QueryResponse,
    introspection::definition::schema::Schema,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};

use crate::{field_resolver::FieldResolver, root_resolver::IntrospectionRootElement};

/// Answers `__schema`, `__type` and root-level `__typename`. Other fields are left to the
/// remaining subsystem resolvers.
pub struct IntrospectionResolver {
    schema: Arc<Schema>,
}

impl IntrospectionResolver {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }
}

#[async_trait::async_trait]
impl SubsystemGraphQLResolver for IntrospectionResolver {
    fn id(&self) -> &'static str {
        "introspection"
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<QueryResponse>, SubsystemResolutionError> {
        let name = field.name.as_str();

        let schema = &self.schema;

        if name.starts_with("__") {
            let introspection_root = IntrospectionRootElement {
                schema,
                operation_type: &operation_type,
                name,
            };
            let body = introspection_root
                .resolve_field(field, schema)
                .await
                .map(QueryResponse::json)?;

            Ok(Some(body))
        } else {
            Ok(None)
        }
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        vec![]
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        vec![]
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        vec![]
    }
}
