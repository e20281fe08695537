// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{BaseType, Type};
use async_graphql_value::Name;
use async_trait::async_trait;
use core_resolver::introspection::definition::schema::{
    MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, SUBSCRIPTION_ROOT_TYPENAME, Schema,
};
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;
use serde_json::Value;

use crate::field_resolver::FieldResolver;

use super::resolver_support::Resolver;

#[async_trait]
impl FieldResolver<Value, SubsystemResolutionError> for Schema {
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "types" => {
                self.type_definitions
                    .resolve_value(&field.subfields, schema)
                    .await
            }
            "queryType" => root_type(QUERY_ROOT_TYPENAME, field, schema).await,
            "mutationType" => root_type(MUTATION_ROOT_TYPENAME, field, schema).await,
            "subscriptionType" => root_type(SUBSCRIPTION_ROOT_TYPENAME, field, schema).await,
            "directives" => Ok(Value::Array(vec![])),
            "description" => Ok(Value::Null),
            "__typename" => Ok(Value::String("__Schema".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "Schema",
            )),
        }
    }
}

/// `null` when the schema has no such root (no mutations, never subscriptions).
async fn root_type(
    name: &str,
    field: &ValidatedField,
    schema: &Schema,
) -> Result<Value, SubsystemResolutionError> {
    if schema.get_type_definition(name).is_none() {
        return Ok(Value::Null);
    }

    let root_type = Type {
        base: BaseType::Named(Name::new(name)),
        nullable: true,
    };

    root_type.resolve_value(&field.subfields, schema).await
}
