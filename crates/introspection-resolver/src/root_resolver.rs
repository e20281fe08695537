// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::OperationType;
use async_graphql_value::ConstValue;
use async_trait::async_trait;
use core_resolver::introspection::definition::schema::{
    MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, SUBSCRIPTION_ROOT_TYPENAME, Schema,
};
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;
use serde_json::Value;

use crate::field_resolver::FieldResolver;

use super::resolver_support::Resolver;

/// A root field starting with `__`.
#[derive(Debug)]
pub struct IntrospectionRootElement<'a> {
    pub schema: &'a Schema,
    pub operation_type: &'a OperationType,
    pub name: &'a str,
}

#[async_trait]
impl FieldResolver<Value, SubsystemResolutionError> for IntrospectionRootElement<'_> {
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match self.name {
            "__type" => resolve_type(field, schema).await,
            "__schema" => self.schema.resolve_value(&field.subfields, schema).await,
            "__typename" => {
                let typename = match self.operation_type {
                    OperationType::Query => QUERY_ROOT_TYPENAME,
                    OperationType::Mutation => MUTATION_ROOT_TYPENAME,
                    OperationType::Subscription => SUBSCRIPTION_ROOT_TYPENAME,
                };
                Ok(Value::String(typename.to_string()))
            }
            _ => Err(SubsystemResolutionError::InvalidField(
                self.name.into(),
                "introspection root",
            )),
        }
    }
}

async fn resolve_type(
    field: &ValidatedField,
    schema: &Schema,
) -> Result<Value, SubsystemResolutionError> {
    let type_definition = match field.arguments.get("name") {
        Some(ConstValue::String(name_specified)) => schema.get_type_definition(name_specified),
        _ => None,
    };

    type_definition
        .resolve_value(&field.subfields, schema)
        .await
}
