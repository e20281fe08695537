// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::introspection::definition::schema::Schema;
use core_resolver::plugin::SubsystemResolutionError;
use core_resolver::validation::field::ValidatedField;

use async_graphql_parser::types::{BaseType, Type, TypeDefinition, TypeKind};
use async_trait::async_trait;
use serde_json::Value;

use crate::field_resolver::FieldResolver;

use core_model::type_normalization::TypeDefinitionIntrospection;

use super::resolver_support::Resolver;

/// A `LIST` or `NON_NULL` wrapper around `tpe`.
#[derive(Debug)]
struct BoxedType<'a> {
    tpe: &'a Type,
    type_kind: &'a str,
}

#[async_trait]
impl FieldResolver<Value, SubsystemResolutionError> for TypeDefinition {
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "name" => Ok(Value::String(self.name())),
            "kind" => Ok(Value::String(self.kind())),
            "description" => Ok(self.description().map(Value::String).unwrap_or(Value::Null)),
            "fields" => self.fields().resolve_value(&field.subfields, schema).await,
            "interfaces" => match &self.kind {
                TypeKind::Object(_) | TypeKind::Interface(_) => Ok(Value::Array(vec![])),
                _ => Ok(Value::Null),
            },
            "possibleTypes" => Ok(Value::Null),
            "enumValues" => {
                self.enum_values()
                    .resolve_value(&field.subfields, schema)
                    .await
            }
            "inputFields" => {
                self.input_fields()
                    .resolve_value(&field.subfields, schema)
                    .await
            }
            "ofType" => Ok(Value::Null),
            "specifiedByURL" => Ok(Value::Null),
            "__typename" => Ok(Value::String("__Type".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "TypeDefinition",
            )),
        }
    }
}

#[async_trait]
impl FieldResolver<Value, SubsystemResolutionError> for Type {
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        let base_type = &self.base;

        if !self.nullable {
            let underlying = Type {
                base: base_type.to_owned(),
                nullable: true, // Now the underlying type is nullable
            };
            let boxed_type = BoxedType {
                tpe: &underlying,
                type_kind: "NON_NULL",
            };
            boxed_type.resolve_field(field, schema).await
        } else {
            match base_type {
                BaseType::Named(name) => match schema.get_type_definition(name) {
                    Some(tpe) => tpe.resolve_field(field, schema).await,
                    None => Ok(Value::Null),
                },
                BaseType::List(underlying) => {
                    let boxed_type = BoxedType {
                        tpe: underlying,
                        type_kind: "LIST",
                    };
                    boxed_type.resolve_field(field, schema).await
                }
            }
        }
    }
}

#[async_trait]
impl FieldResolver<Value, SubsystemResolutionError> for BoxedType<'_> {
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        schema: &Schema,
    ) -> Result<Value, SubsystemResolutionError> {
        match field.name.as_str() {
            "kind" => Ok(Value::String(self.type_kind.to_owned())),
            "ofType" => self.tpe.resolve_value(&field.subfields, schema).await,
            "name" | "description" | "specifiedByURL" | "fields" | "interfaces"
            | "possibleTypes" | "enumValues" | "inputFields" => Ok(Value::Null),
            "__typename" => Ok(Value::String("__Type".to_string())),
            field_name => Err(SubsystemResolutionError::InvalidField(
                field_name.to_owned(),
                "List/NonNull type",
            )),
        }
    }
}
