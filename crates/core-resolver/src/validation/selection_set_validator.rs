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
    types::{
        Field, FieldDefinition, FragmentDefinition, FragmentSpread, Selection, SelectionSet,
        TypeDefinition, TypeKind,
    },
};
use async_graphql_value::{ConstValue, Name};
use core_model::type_normalization::TypeDefinitionIntrospection;
use indexmap::{IndexMap, map::Entry};

use crate::{
    introspection::definition::schema::{QUERY_ROOT_TYPENAME, Schema},
    validation::{
        arguments_validator::ArgumentValidator, field::ValidatedField, underlying_type,
        validation_error::ValidationError,
    },
};

/// Checks a field at the given depth (root fields are at depth 1); the flag tells if the
/// selection belongs to an introspection query.
pub(super) type DepthCheck<'c> = dyn Fn(usize, bool, Pos) -> Result<(), ValidationError> + 'c;

/// Context for validating a selection set.
pub(super) struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The parent type of this field.
    container_type: &'a TypeDefinition,
    variables: &'a HashMap<Name, ConstValue>,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        container_type: &'a TypeDefinition,
        variables: &'a HashMap<Name, ConstValue>,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            container_type,
            variables,
            fragment_definitions,
        }
    }

    /// Validate the selection set of an operation.
    pub(super) fn validate_root(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth_check: &DepthCheck<'_>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        self.validate(selection_set, 1, None, depth_check)
    }

    /// Validate selection set.
    ///
    /// Validations performed:
    /// - Each field is defined in the `container_type`
    /// - Each fragment referred is defined, applies to the `container_type`, and doesn't spread
    ///   itself (directly or indirectly)
    /// - Object-typed fields have a selection set and scalar-typed fields don't
    /// - Arguments to each field are valid (see [ArgumentValidator] for more details)
    /// - Fields with the same output name select the same field with the same arguments
    ///
    /// # Returns
    ///   A vector of validated fields (any fragment is resolved and inlined and fields with the
    ///   same output name are merged, thus normalizing the fields)
    fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
        depth: usize,
        introspection: Option<bool>,
        depth_check: &DepthCheck<'_>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let mut fields = vec![];
        let mut fragment_trail = vec![];

        self.collect_fields(
            &selection_set.node,
            depth,
            introspection,
            depth_check,
            &mut fragment_trail,
            &mut fields,
        )?;

        merge_fields(fields)
    }

    fn collect_fields(
        &self,
        selection_set: &SelectionSet,
        depth: usize,
        introspection: Option<bool>,
        depth_check: &DepthCheck<'_>,
        fragment_trail: &mut Vec<Name>,
        fields: &mut Vec<ValidatedField>,
    ) -> Result<(), ValidationError> {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    fields.push(self.validate_field(field, depth, introspection, depth_check)?)
                }
                Selection::FragmentSpread(fragment_spread) => {
                    let fragment_name = &fragment_spread.node.fragment_name.node;

                    if fragment_trail.contains(fragment_name) {
                        return Err(ValidationError::FragmentCycle(
                            fragment_name.to_string(),
                            fragment_spread.pos,
                        ));
                    }

                    let fragment_definition = self.fragment_definition(fragment_spread)?;

                    let type_condition = &fragment_definition.type_condition.node.on.node;
                    if type_condition != &self.container_type.name.node {
                        return Err(ValidationError::FragmentTypeMismatch(
                            fragment_name.to_string(),
                            self.container_type.name.node.to_string(),
                            fragment_spread.pos,
                        ));
                    }

                    fragment_trail.push(fragment_name.clone());
                    self.collect_fields(
                        &fragment_definition.selection_set.node,
                        depth,
                        introspection,
                        depth_check,
                        fragment_trail,
                        fields,
                    )?;
                    fragment_trail.pop();
                }
                Selection::InlineFragment(inline_fragment) => {
                    return Err(ValidationError::InlineFragmentNotSupported(
                        inline_fragment.pos,
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_field(
        &self,
        field: &Positioned<Field>,
        depth: usize,
        introspection: Option<bool>,
        depth_check: &DepthCheck<'_>,
    ) -> Result<ValidatedField, ValidationError> {
        let field_name = field.node.name.node.as_str();
        let is_introspection = introspection.unwrap_or_else(|| field_name.starts_with("__"));

        depth_check(depth, is_introspection, field.pos)?;

        let alias = field.node.alias.as_ref().map(|alias| alias.node.clone());
        let has_selection = !field.node.selection_set.node.items.is_empty();

        // Special treatment for the __typename field, since we are not supposed to expose it as
        // a normal field (for example, we should not declare that the "Team" type has a __typename field")
        if field_name == "__typename" {
            return if !field.node.arguments.is_empty() {
                Err(ValidationError::StrayArguments(
                    field
                        .node
                        .arguments
                        .iter()
                        .map(|arg| arg.0.node.to_string())
                        .collect(),
                    field_name.to_string(),
                    field.pos,
                ))
            } else if has_selection {
                Err(ValidationError::ScalarWithField(
                    field_name.to_string(),
                    field.pos,
                ))
            } else {
                Ok(ValidatedField {
                    alias,
                    name: field.node.name.node.clone(),
                    arguments: IndexMap::new(),
                    subfields: vec![],
                    pos: field.pos,
                })
            };
        }

        let field_definition = self.get_field_definition(field)?;

        let field_type_name = underlying_type(&field_definition.ty.node);
        let field_type = self
            .schema
            .get_type_definition(field_type_name)
            .ok_or_else(|| {
                ValidationError::InvalidFieldType(field_type_name.to_string(), field.pos)
            })?;

        let subfields = match &field_type.kind {
            TypeKind::Object(_) | TypeKind::Interface(_) | TypeKind::Union(_) => {
                if !has_selection {
                    return Err(ValidationError::MissingSubselection(
                        field_name.to_string(),
                        field_type_name.to_string(),
                        field.pos,
                    ));
                }

                let subfield_validator = Self::new(
                    self.schema,
                    field_type,
                    self.variables,
                    self.fragment_definitions,
                );

                subfield_validator.validate(
                    &field.node.selection_set,
                    depth + 1,
                    Some(is_introspection),
                    depth_check,
                )?
            }
            _ => {
                if has_selection {
                    return Err(ValidationError::ScalarWithField(
                        field_name.to_string(),
                        field.pos,
                    ));
                }
                vec![]
            }
        };

        let argument_definitions: Vec<_> = field_definition
            .arguments
            .iter()
            .map(|argument| &argument.node)
            .collect();
        let arguments = ArgumentValidator::new(self.variables, field).validate(&argument_definitions)?;

        Ok(ValidatedField {
            alias,
            name: field.node.name.node.clone(),
            arguments,
            subfields,
            pos: field.pos,
        })
    }

    fn fragment_definition(
        &self,
        fragment: &Positioned<FragmentSpread>,
    ) -> Result<&'a FragmentDefinition, ValidationError> {
        self.fragment_definitions
            .get(&fragment.node.fragment_name.node)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment.node.fragment_name.node.as_str().to_string(),
                    fragment.pos,
                )
            })
    }

    fn get_field_definition(
        &self,
        field: &Positioned<Field>,
    ) -> Result<&'a FieldDefinition, ValidationError> {
        let field_name = field.node.name.node.as_str();

        let field_definition = self
            .container_type
            .fields()
            .and_then(|fields| fields.iter().find(|f| f.node.name.node == field_name))
            .map(|f| &f.node);

        let field_definition = match field_definition {
            Some(field_definition) => Some(field_definition),
            // We have to treat the query root type specially, since its __schema and __type fields are not
            // "ordinary" fields, but are instead special-cased in the introspection query (much the same way
            // as the __typename field).
            None if self.container_type.name.node == QUERY_ROOT_TYPENAME => match field_name {
                "__schema" => Some(&self.schema.schema_field_definition),
                "__type" => Some(&self.schema.type_field_definition),
                _ => None,
            },
            None => None,
        };

        field_definition.ok_or_else(|| {
            ValidationError::InvalidField(
                field_name.to_owned(),
                self.container_type.name.node.to_string(),
                field.pos,
            )
        })
    }
}

/// Merge fields with the same output name, so that
/// `{ team { id } team { name } }` becomes `{ team { id name } }`.
fn merge_fields(fields: Vec<ValidatedField>) -> Result<Vec<ValidatedField>, ValidationError> {
    let mut merged: IndexMap<String, ValidatedField> = IndexMap::new();

    for field in fields {
        match merged.entry(field.output_name()) {
            Entry::Vacant(entry) => {
                entry.insert(field);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();

                if existing.name != field.name || existing.arguments != field.arguments {
                    return Err(ValidationError::MergeFailure(
                        field.output_name(),
                        existing.pos,
                        field.pos,
                    ));
                }

                let subfields = std::mem::take(&mut existing.subfields)
                    .into_iter()
                    .chain(field.subfields)
                    .collect();
                existing.subfields = merge_fields(subfields)?;
            }
        }
    }

    Ok(merged.into_values().collect())
}
