// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Pos, Positioned,
    types::{
        BaseType, EnumValueDefinition, FieldDefinition, InputValueDefinition, Type,
        TypeDefinition, TypeKind,
    },
};
use async_graphql_value::Name;

pub trait FieldDefinitionProvider<S> {
    fn field_definition(&self, system: &S) -> FieldDefinition;
}

pub trait TypeDefinitionProvider<S> {
    fn type_definition(&self, system: &S) -> TypeDefinition;
}

pub trait InputValueProvider {
    fn input_value(&self) -> InputValueDefinition;
}

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeModifier {
    /// `[T]`
    List,
    /// `T!`
    NonNull,
    /// `T`
    Optional,
}

/// Build the GraphQL type for `type_name` with the given modifier. List elements are nullable,
/// matching `[Player]`.
pub fn modified_type(type_name: &str, modifier: TypeModifier) -> Type {
    let named = |nullable| Type {
        base: BaseType::Named(Name::new(type_name)),
        nullable,
    };

    match modifier {
        TypeModifier::List => Type {
            base: BaseType::List(Box::new(named(true))),
            nullable: true,
        },
        TypeModifier::NonNull => named(false),
        TypeModifier::Optional => named(true),
    }
}

/// Introspection parameter such as `id: Int!`
pub trait Parameter {
    fn name(&self) -> &str;
    fn typ(&self) -> Type;
}

impl<T: Parameter> InputValueProvider for T {
    fn input_value(&self) -> InputValueDefinition {
        InputValueDefinition {
            description: None,
            name: default_positioned_name(self.name()),
            ty: default_positioned(self.typ()),
            default_value: None,
            directives: vec![],
        }
    }
}

/// A root field such as `team(id: Int!): Team`. Combining these forms the `Query` and `Mutation`
/// object definitions.
pub trait Operation {
    type Param: Parameter;

    fn name(&self) -> &str;
    fn parameters(&self) -> &[Self::Param];
    fn return_type(&self) -> Type;
}

impl<T: Operation, S> FieldDefinitionProvider<S> for T {
    fn field_definition(&self, _system: &S) -> FieldDefinition {
        let arguments = self
            .parameters()
            .iter()
            .map(|parameter| default_positioned(parameter.input_value()))
            .collect();

        FieldDefinition {
            description: None,
            name: default_positioned_name(self.name()),
            arguments,
            directives: vec![],
            ty: default_positioned(self.return_type()),
        }
    }
}

/// Deal with variants of `TypeDefinition` to give a uniform view suitable for introspection
pub trait TypeDefinitionIntrospection {
    fn name(&self) -> String;
    fn kind(&self) -> String;
    fn description(&self) -> Option<String>;
    fn fields(&self) -> Option<&Vec<Positioned<FieldDefinition>>>;
    fn interfaces(&self) -> Option<&Vec<Positioned<Name>>>;
    fn possible_types(&self) -> Option<&Vec<Positioned<Name>>>;
    fn enum_values(&self) -> Option<&Vec<Positioned<EnumValueDefinition>>>;
    fn input_fields(&self) -> Option<&Vec<Positioned<InputValueDefinition>>>;
}

impl TypeDefinitionIntrospection for TypeDefinition {
    fn name(&self) -> String {
        self.name.node.to_string()
    }

    fn kind(&self) -> String {
        match self.kind {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object(_) => "OBJECT",
            TypeKind::Interface(_) => "INTERFACE",
            TypeKind::Union(_) => "UNION",
            TypeKind::Enum(_) => "ENUM",
            TypeKind::InputObject(_) => "INPUT_OBJECT",
        }
        .to_owned()
    }

    fn description(&self) -> Option<String> {
        self.description.as_ref().map(|d| d.node.to_owned())
    }

    // The following return null except for the kinds that define them
    fn fields(&self) -> Option<&Vec<Positioned<FieldDefinition>>> {
        match &self.kind {
            TypeKind::Object(value) => Some(&value.fields),
            TypeKind::Interface(value) => Some(&value.fields),
            _ => None,
        }
    }

    fn interfaces(&self) -> Option<&Vec<Positioned<Name>>> {
        match &self.kind {
            TypeKind::Object(value) => Some(&value.implements),
            _ => None,
        }
    }

    fn possible_types(&self) -> Option<&Vec<Positioned<Name>>> {
        match &self.kind {
            TypeKind::Union(value) => Some(&value.members),
            _ => None,
        }
    }

    fn enum_values(&self) -> Option<&Vec<Positioned<EnumValueDefinition>>> {
        match &self.kind {
            TypeKind::Enum(value) => Some(&value.values),
            _ => None,
        }
    }

    fn input_fields(&self) -> Option<&Vec<Positioned<InputValueDefinition>>> {
        match &self.kind {
            TypeKind::InputObject(value) => Some(&value.fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdParameter;

    impl Parameter for IdParameter {
        fn name(&self) -> &str {
            "id"
        }

        fn typ(&self) -> Type {
            modified_type("Int", TypeModifier::NonNull)
        }
    }

    struct TeamQuery([IdParameter; 1]);

    impl Operation for TeamQuery {
        type Param = IdParameter;

        fn name(&self) -> &str {
            "team"
        }

        fn parameters(&self) -> &[IdParameter] {
            &self.0
        }

        fn return_type(&self) -> Type {
            modified_type("Team", TypeModifier::Optional)
        }
    }

    #[test]
    fn type_modifiers() {
        assert_eq!(modified_type("Team", TypeModifier::List).to_string(), "[Team]");
        assert_eq!(modified_type("Int", TypeModifier::NonNull).to_string(), "Int!");
        assert_eq!(modified_type("String", TypeModifier::Optional).to_string(), "String");
    }

    #[test]
    fn operation_field_definition() {
        let definition = TeamQuery([IdParameter]).field_definition(&());

        assert_eq!(definition.name.node.as_str(), "team");
        assert_eq!(definition.ty.node.to_string(), "Team");
        assert_eq!(definition.arguments.len(), 1);
        assert_eq!(definition.arguments[0].node.name.node.as_str(), "id");
        assert_eq!(definition.arguments[0].node.ty.node.to_string(), "Int!");
    }
}
