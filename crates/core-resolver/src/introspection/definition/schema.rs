// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::HashSet, sync::Arc};

use async_graphql_parser::{
    Positioned,
    types::{
        BaseType, FieldDefinition, InputValueDefinition, ObjectType, Type, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::Name;
use core_model::{
    primitive_type::PrimitiveType,
    type_normalization::{default_positioned, default_positioned_name},
};

use crate::{plugin::SubsystemGraphQLResolver, validation::underlying_type};

/// The GraphQL schema served by the system: the subsystems' types and root fields along with the
/// introspection types. Used both to validate documents and to answer introspection queries.
#[derive(Debug, Clone)]
pub struct Schema {
    pub type_definitions: Vec<TypeDefinition>,
    pub(crate) schema_field_definition: FieldDefinition,
    pub(crate) type_field_definition: FieldDefinition,
}

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";
pub const SUBSCRIPTION_ROOT_TYPENAME: &str = "Subscription";

impl Schema {
    /// Collect the schema from subsystem resolvers. Root fields keep the order in which the
    /// subsystems declare them; types are sorted by name.
    pub fn new_from_resolvers(
        subsystem_resolvers: &[Arc<dyn SubsystemGraphQLResolver + Send + Sync>],
        allow_mutations: bool,
    ) -> Schema {
        let type_definitions: Vec<TypeDefinition> = {
            let mut typedefs: Vec<_> = subsystem_resolvers
                .iter()
                .flat_map(|resolver| resolver.schema_types())
                .collect();

            // ensure introspection outputs types in a stable order
            typedefs.sort_by_key(|f| f.name.node.clone());
            typedefs
        };

        let queries = subsystem_resolvers
            .iter()
            .flat_map(|resolver| resolver.schema_queries())
            .collect();

        let mutations = if allow_mutations {
            subsystem_resolvers
                .iter()
                .flat_map(|resolver| resolver.schema_mutations())
                .collect()
        } else {
            vec![]
        };

        Self::new(type_definitions, queries, mutations)
    }

    pub(crate) fn new(
        type_definitions: Vec<TypeDefinition>,
        queries: Vec<FieldDefinition>,
        mutations: Vec<FieldDefinition>,
    ) -> Schema {
        let mut type_definitions = type_definitions;

        type_definitions.extend(PrimitiveType::ALL.iter().map(|pt| pt.type_definition()));

        // Even though we resolve __type and __schema fields for the Query type, GraphQL
        // doesn't allow them to be exposed as an ordinary field. Therefore, we have to treat them
        // specially (see SelectionSetValidator::get_field_definition)
        if !queries.is_empty() {
            type_definitions.push(Self::create_root_type(QUERY_ROOT_TYPENAME, queries));
        }

        if !mutations.is_empty() {
            type_definitions.push(Self::create_root_type(MUTATION_ROOT_TYPENAME, mutations));
        }

        type_definitions.push(Self::create_schema_type_definition());
        type_definitions.push(Self::create_type_definition());
        type_definitions.push(Self::create_field_definition());
        type_definitions.push(Self::create_directive_definition());
        type_definitions.push(Self::create_directive_location_definition());
        type_definitions.push(Self::create_input_value_definition());
        type_definitions.push(Self::create_enum_value_definition());

        {
            // Retain only the types reachable from the root types, so that a type declared by
            // a subsystem but not used by any root field doesn't show up in introspection.
            let mut used_types = HashSet::new();

            for root_type in &[
                QUERY_ROOT_TYPENAME,
                MUTATION_ROOT_TYPENAME,
                SUBSCRIPTION_ROOT_TYPENAME,
                "__Schema",
                "__Type",
            ] {
                Self::get_used_types(root_type, &type_definitions, &mut used_types);
            }

            type_definitions.retain(|td| used_types.contains(td.name.node.as_str()));

            let mut seen = HashSet::new();
            type_definitions.retain(|td| seen.insert(td.name.node.clone()));
        }

        Schema {
            type_definitions,
            schema_field_definition: Self::create_field(
                "__schema",
                false,
                Some("Access the current type schema of this server."),
                "__Schema",
                vec![],
            )
            .node,
            type_field_definition: Self::create_field(
                "__type",
                true,
                None,
                "__Type",
                vec![Self::create_argument("name", "String", true)],
            )
            .node,
        }
    }

    fn get_used_types(
        root_type_name: &str,
        type_definitions: &[TypeDefinition],
        used_types: &mut HashSet<String>,
    ) {
        if used_types.contains(root_type_name) {
            return;
        }

        used_types.insert(root_type_name.to_string());

        let root_type = type_definitions
            .iter()
            .find(|td| td.name.node.as_str() == root_type_name);

        if let Some(root_type) = root_type {
            match &root_type.kind {
                TypeKind::Object(ObjectType { fields, .. }) => {
                    for field in fields {
                        Self::get_used_types(
                            underlying_type(&field.node.ty.node).as_str(),
                            type_definitions,
                            used_types,
                        );
                        for arg in &field.node.arguments {
                            let arg_type_name = underlying_type(&arg.node.ty.node).as_str();
                            Self::get_used_types(arg_type_name, type_definitions, used_types);
                        }
                    }
                }
                TypeKind::Interface(interface_type) => {
                    for field in &interface_type.fields {
                        Self::get_used_types(
                            underlying_type(&field.node.ty.node).as_str(),
                            type_definitions,
                            used_types,
                        );
                    }
                }
                TypeKind::InputObject(object_type) => {
                    for field in &object_type.fields {
                        let arg_type_name = underlying_type(&field.node.ty.node).as_str();
                        Self::get_used_types(arg_type_name, type_definitions, used_types);
                    }
                }
                TypeKind::Scalar | TypeKind::Union(_) | TypeKind::Enum(_) => {}
            }
        }
    }

    pub fn get_type_definition(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.type_definitions
            .iter()
            .find(|td| td.name.node.as_str() == type_name)
    }

    fn create_root_type(name: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields: fields.into_iter().map(default_positioned).collect(),
            }),
        }
    }

    fn create_schema_type_definition() -> TypeDefinition {
        let mut fields = vec![Self::create_field(
            "queryType", false, None, "__Type", vec![],
        )];
        fields.extend(["mutationType", "subscriptionType"].into_iter().map(
            |field_name| Self::create_field(field_name, true, None, "__Type", vec![]),
        ));

        fields.push(Self::create_field(
            "description",
            true,
            None,
            "String",
            vec![],
        ));
        fields.push(Self::create_list_field(
            "directives",
            false,
            Some("A list of the directives supported by this server."),
            "__Directive",
            vec![],
        ));
        fields.push(Self::create_list_field(
            "types",
            false,
            Some("A list of the types supported by this server."),
            "__Type",
            vec![],
        ));

        TypeDefinition {
            extend: false,
            description: Some(default_positioned(
                "The current type schema of this server.".to_string(),
            )),
            name: default_positioned_name("__Schema"),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields,
            }),
        }
    }

    fn create_type_definition() -> TypeDefinition {
        let include_deprecated = || vec![Self::create_argument("includeDeprecated", "Boolean", true)];

        let fields = vec![
            Self::create_field("name", true, None, "String", vec![]),
            Self::create_field("description", true, None, "String", vec![]),
            Self::create_field("kind", false, None, "String", vec![]),
            Self::create_field("specifiedByURL", true, None, "String", vec![]),
            Self::create_field("ofType", true, None, "__Type", vec![]),
            Self::create_list_field("fields", true, None, "__Field", include_deprecated()),
            Self::create_list_field(
                "inputFields",
                true,
                None,
                "__InputValue",
                include_deprecated(),
            ),
            Self::create_list_field(
                "enumValues",
                true,
                None,
                "__EnumValue",
                include_deprecated(),
            ),
            Self::create_list_field("interfaces", true, None, "__Type", vec![]),
            Self::create_list_field("possibleTypes", true, None, "__Type", vec![]),
        ];

        Self::create_object_type("__Type", fields)
    }

    fn create_field_definition() -> TypeDefinition {
        Self::create_object_type(
            "__Field",
            vec![
                Self::create_field("name", false, None, "String", vec![]),
                Self::create_field("description", true, None, "String", vec![]),
                Self::create_list_field(
                    "args",
                    false,
                    None,
                    "__InputValue",
                    vec![Self::create_argument("includeDeprecated", "Boolean", true)],
                ),
                Self::create_field("type", false, None, "__Type", vec![]),
                Self::create_field("isDeprecated", false, None, "Boolean", vec![]),
                Self::create_field("deprecationReason", true, None, "String", vec![]),
            ],
        )
    }

    fn create_directive_definition() -> TypeDefinition {
        Self::create_object_type(
            "__Directive",
            vec![
                Self::create_field("name", false, None, "String", vec![]),
                Self::create_field("description", true, None, "String", vec![]),
                Self::create_field("isRepeatable", false, None, "Boolean", vec![]),
                Self::create_list_field(
                    "args",
                    false,
                    None,
                    "__InputValue",
                    vec![Self::create_argument("includeDeprecated", "Boolean", true)],
                ),
                Self::create_list_field("locations", false, None, "__DirectiveLocation", vec![]),
            ],
        )
    }

    fn create_directive_location_definition() -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name("__DirectiveLocation"),
            directives: vec![],
            kind: TypeKind::Scalar,
        }
    }

    fn create_input_value_definition() -> TypeDefinition {
        Self::create_object_type(
            "__InputValue",
            vec![
                Self::create_field("name", false, None, "String", vec![]),
                Self::create_field("description", true, None, "String", vec![]),
                Self::create_field("type", false, None, "__Type", vec![]),
                Self::create_field("defaultValue", true, None, "String", vec![]),
                Self::create_field("isDeprecated", false, None, "Boolean", vec![]),
                Self::create_field("deprecationReason", true, None, "String", vec![]),
            ],
        )
    }

    fn create_enum_value_definition() -> TypeDefinition {
        Self::create_object_type(
            "__EnumValue",
            vec![
                Self::create_field("name", false, None, "String", vec![]),
                Self::create_field("description", true, None, "String", vec![]),
                Self::create_field("isDeprecated", false, None, "Boolean", vec![]),
                Self::create_field("deprecationReason", true, None, "String", vec![]),
            ],
        )
    }

    fn create_object_type(name: &str, fields: Vec<Positioned<FieldDefinition>>) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields,
            }),
        }
    }

    fn create_argument(
        name: &str,
        type_name: &str,
        nullable: bool,
    ) -> Positioned<InputValueDefinition> {
        default_positioned(InputValueDefinition {
            description: None,
            name: default_positioned_name(name),
            directives: vec![],
            default_value: None,
            ty: default_positioned(Type {
                base: BaseType::Named(Name::new(type_name)),
                nullable,
            }),
        })
    }

    pub fn create_field(
        name: &str,
        nullable: bool,
        description: Option<&str>,
        element_type: &str,
        arguments: Vec<Positioned<InputValueDefinition>>,
    ) -> Positioned<FieldDefinition> {
        default_positioned(FieldDefinition {
            description: description.map(|d| default_positioned(d.to_string())),
            name: default_positioned_name(name),
            arguments,
            ty: default_positioned(Type {
                base: BaseType::Named(Name::new(element_type)),
                nullable,
            }),
            directives: vec![],
        })
    }

    /// A `[T!]` field (`[T!]!` if not nullable).
    fn create_list_field(
        name: &str,
        nullable: bool,
        description: Option<&str>,
        element_type: &str,
        arguments: Vec<Positioned<InputValueDefinition>>,
    ) -> Positioned<FieldDefinition> {
        default_positioned(FieldDefinition {
            description: description.map(|d| default_positioned(d.to_string())),
            name: default_positioned_name(name),
            arguments,
            ty: default_positioned(Type {
                base: BaseType::List(Box::new(Type {
                    base: BaseType::Named(Name::new(element_type)),
                    nullable: false,
                })),
                nullable,
            }),
            directives: vec![],
        })
    }
}
