// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{BaseType, Field, InputValueDefinition},
};
use async_graphql_value::{ConstValue, Name, Number, Value};
use core_model::primitive_type::PrimitiveType;
use indexmap::IndexMap;

use crate::validation::validation_error::ValidationError;

pub struct ArgumentValidator<'a> {
    variables: &'a HashMap<Name, ConstValue>,
    field: &'a Positioned<Field>,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(variables: &'a HashMap<Name, ConstValue>, field: &'a Positioned<Field>) -> Self {
        Self { variables, field }
    }

    /// Validations performed:
    /// - Ensure that all required arguments are provided
    /// - Ensure that there are no stray arguments (arguments that are not defined in the field)
    /// - Ensure that each value matches the argument type (including the `Int` range)
    pub(super) fn validate(
        &self,
        field_argument_definitions: &[&InputValueDefinition],
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        let field_name = self.field.node.name.node.as_str();

        // Stray arguments tracking: 1. Maintain a map of all the arguments supplied in the query
        let mut field_arguments: IndexMap<_, _> = self
            .field
            .node
            .arguments
            .iter()
            .map(|(name, value)| (&name.node, value))
            .collect();

        let validated_arguments = field_argument_definitions
            .iter()
            .filter_map(|argument_definition| {
                let argument_name = &argument_definition.name.node;
                // Stray arguments tracking: 2. Remove the argument being processed
                let argument_value = field_arguments.shift_remove(argument_name);

                self.validate_argument(argument_definition, argument_value)
                    .map(|argument_value| {
                        argument_value
                            .map(|argument_value| (argument_name.to_string(), argument_value))
                    })
            })
            .collect::<Result<_, _>>()?;

        // Stray arguments tracking: 3. If any arguments are left in the map, they are stray arguments (not defined in the field)
        if !field_arguments.is_empty() {
            let stray_arguments = field_arguments
                .keys()
                .map(|name| name.to_string())
                .collect::<Vec<_>>();

            Err(ValidationError::StrayArguments(
                stray_arguments,
                field_name.to_string(),
                self.field.pos,
            ))
        } else {
            Ok(validated_arguments)
        }
    }

    /// Validate a single argument
    ///
    /// Returns `None` for an optional argument that wasn't supplied.
    fn validate_argument(
        &self,
        argument_definition: &InputValueDefinition,
        argument_value: Option<&Positioned<Value>>,
    ) -> Option<Result<ConstValue, ValidationError>> {
        match argument_value {
            Some(value) => Some(self.validate_value(argument_definition, &value.node, value.pos)),
            None => {
                if argument_definition.ty.node.nullable {
                    None
                } else {
                    Some(Err(ValidationError::RequiredArgumentNotFound(
                        argument_definition.name.node.to_string(),
                        self.field.pos,
                    )))
                }
            }
        }
    }

    /// Validations performed:
    /// - If the argument is a variable, the variable is defined
    /// - A null value is specified only for a nullable argument
    /// - Scalars match the expected type and integers fit in 32 bits
    /// - Lists match the expected shape
    fn validate_value(
        &self,
        argument_definition: &InputValueDefinition,
        value: &Value,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        match value {
            Value::Variable(name) => match self.variables.get(name) {
                Some(resolved_variable) => self.validate_value(
                    argument_definition,
                    &resolved_variable.clone().into_value(),
                    pos,
                ),
                None => Err(ValidationError::VariableNotFound(name.to_string(), pos)),
            },
            Value::Null => {
                if argument_definition.ty.node.nullable {
                    Ok(ConstValue::Null)
                } else {
                    Err(ValidationError::RequiredArgumentNotFound(
                        argument_definition.name.node.to_string(),
                        pos,
                    ))
                }
            }
            Value::Number(number) => self.validate_number_argument(argument_definition, number, pos),
            Value::String(string) => self.validate_scalar_argument(
                "String",
                PrimitiveType::String,
                || Ok(ConstValue::String(string.to_string())),
                argument_definition,
                pos,
            ),
            Value::Boolean(boolean) => self.validate_scalar_argument(
                "Boolean",
                PrimitiveType::Boolean,
                || Ok(ConstValue::Boolean(*boolean)),
                argument_definition,
                pos,
            ),
            Value::List(elems) => self.validate_list_argument(argument_definition, elems, pos),
            Value::Binary(_) => self.invalid_type(argument_definition, "Binary", pos),
            Value::Enum(_) => self.invalid_type(argument_definition, "Enum", pos),
            Value::Object(_) => self.invalid_type(argument_definition, "Object", pos),
        }
    }

    fn validate_number_argument(
        &self,
        argument_definition: &InputValueDefinition,
        number: &Number,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        self.validate_scalar_argument(
            "Number",
            PrimitiveType::Int,
            || match number.as_i64() {
                Some(value) => i32::try_from(value)
                    .map(|value| ConstValue::Number(value.into()))
                    .map_err(|_| ValidationError::ValueOutOfRange {
                        argument_name: argument_definition.name.node.to_string(),
                        range_detail: format!("min = {}, max = {}", i32::MIN, i32::MAX),
                        value_detail: format!("provided value = {value}"),
                        pos,
                    }),
                // Floats and integers beyond 64 bits
                None => Err(ValidationError::InvalidArgumentType {
                    argument_name: argument_definition.name.node.to_string(),
                    expected_type: argument_definition.ty.node.to_string(),
                    actual_type: "Float".to_string(),
                    pos,
                }),
            },
            argument_definition,
            pos,
        )
    }

    /// Validate a scalar argument
    /// Check if the argument is compatible with the expected destination type
    fn validate_scalar_argument(
        &self,
        argument_typename: &str,
        destination_type: PrimitiveType,
        to_val: impl FnOnce() -> Result<ConstValue, ValidationError>,
        argument_definition: &InputValueDefinition,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let ty = &argument_definition.ty.node;

        match &ty.base {
            BaseType::Named(name) if name.as_str() == destination_type.name() => to_val(),
            _ => self.invalid_type(argument_definition, argument_typename, pos),
        }
    }

    fn validate_list_argument(
        &self,
        argument_definition: &InputValueDefinition,
        elems: &[Value],
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        let ty = &argument_definition.ty.node;

        match &ty.base {
            BaseType::Named(name) => Err(ValidationError::InvalidArgumentType {
                argument_name: argument_definition.name.node.to_string(),
                expected_type: name.to_string(),
                actual_type: "List".to_string(),
                pos,
            }),
            BaseType::List(elem_type) => {
                // Peel off the list type to get the element type
                let elem_argument_definition = InputValueDefinition {
                    ty: Positioned::new(elem_type.as_ref().clone(), pos),
                    ..argument_definition.clone()
                };

                let validated_elems = elems
                    .iter()
                    .map(|elem| self.validate_value(&elem_argument_definition, elem, pos))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(ConstValue::List(validated_elems))
            }
        }
    }

    fn invalid_type(
        &self,
        argument_definition: &InputValueDefinition,
        actual_type: &str,
        pos: Pos,
    ) -> Result<ConstValue, ValidationError> {
        Err(ValidationError::InvalidArgumentType {
            argument_name: argument_definition.name.node.to_string(),
            expected_type: argument_definition.ty.node.to_string(),
            actual_type: actual_type.to_string(),
            pos,
        })
    }
}
