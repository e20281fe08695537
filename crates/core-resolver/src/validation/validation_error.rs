// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    QueryParsingFailed(String, Pos, Option<Pos>),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String, Pos),

    #[error("Variable '{0}' could not be deserialized: {2}")]
    MalformedVariable(String, Pos, serde_json::Error),

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Fragment '{0}' spreads itself")]
    FragmentCycle(String, Pos),

    #[error("Fragment '{0}' cannot be spread on type '{1}'")]
    FragmentTypeMismatch(String, String, Pos),

    #[error("Inline fragments are not supported")]
    InlineFragmentNotSupported(Pos),

    #[error("No such operation '{0}'")]
    OperationNotFound(String, Pos),

    #[error("Subscriptions are not supported")]
    SubscriptionNotSupported(Pos),

    #[error("Field '{0}' is not valid for type '{1}'")]
    InvalidField(String, String, Pos),

    #[error("Field '{0}' is of a scalar type, which should not specify fields")]
    ScalarWithField(String, Pos),

    #[error("Field '{0}' of type '{1}' must have a selection of subfields")]
    MissingSubselection(String, String, Pos),

    #[error("Field type '{0}' is not valid")]
    InvalidFieldType(String, Pos),

    #[error("Fields with output name '{0}' select different fields or arguments")]
    MergeFailure(String, Pos, Pos),

    #[error("Required argument '{0}' not found")]
    RequiredArgumentNotFound(String, Pos),

    #[error("Argument(s) '{0:?}' invalid for '{1}'")]
    StrayArguments(Vec<String>, String, Pos),

    #[error(
        "Argument '{argument_name}' is not of a valid type. Expected '{expected_type}', got '{actual_type}'"
    )]
    InvalidArgumentType {
        argument_name: String,
        expected_type: String,
        actual_type: String,
        pos: Pos,
    },

    #[error("Argument '{argument_name}' is out of range: {range_detail}, {value_detail}")]
    ValueOutOfRange {
        argument_name: String,
        range_detail: String,
        value_detail: String,
        pos: Pos,
    },

    #[error("Selection set too deep")]
    SelectionSetTooDeep(Pos),

    #[error("No operation found")]
    NoOperationFound,

    #[error("Must provide operation name if query contains multiple operations")]
    MultipleOperationsNoOperationName,

    #[error("operationName '{0}' doesn't match any operation")]
    MultipleOperationsUnmatchedOperationName(String),
}

impl ValidationError {
    pub fn position1(&self) -> Pos {
        match self {
            ValidationError::QueryParsingFailed(_, pos, _) => *pos,
            ValidationError::VariableNotFound(_, pos) => *pos,
            ValidationError::MalformedVariable(_, pos, _) => *pos,
            ValidationError::FragmentDefinitionNotFound(_, pos) => *pos,
            ValidationError::FragmentCycle(_, pos) => *pos,
            ValidationError::FragmentTypeMismatch(_, _, pos) => *pos,
            ValidationError::InlineFragmentNotSupported(pos) => *pos,
            ValidationError::OperationNotFound(_, pos) => *pos,
            ValidationError::SubscriptionNotSupported(pos) => *pos,
            ValidationError::InvalidField(_, _, pos) => *pos,
            ValidationError::InvalidFieldType(_, pos) => *pos,
            ValidationError::ScalarWithField(_, pos) => *pos,
            ValidationError::MissingSubselection(_, _, pos) => *pos,
            ValidationError::MergeFailure(_, pos, _) => *pos,
            ValidationError::RequiredArgumentNotFound(_, pos) => *pos,
            ValidationError::StrayArguments(_, _, pos) => *pos,
            ValidationError::InvalidArgumentType { pos, .. } => *pos,
            ValidationError::ValueOutOfRange { pos, .. } => *pos,
            ValidationError::SelectionSetTooDeep(pos) => *pos,
            ValidationError::NoOperationFound => Pos::default(),
            ValidationError::MultipleOperationsNoOperationName => Pos::default(),
            ValidationError::MultipleOperationsUnmatchedOperationName(_) => Pos::default(),
        }
    }

    pub fn position2(&self) -> Option<Pos> {
        match self {
            ValidationError::QueryParsingFailed(_, _, pos) => *pos,
            ValidationError::MergeFailure(_, _, pos) => Some(*pos),
            _ => None,
        }
    }

    /// Positions to report as `locations`. Errors not tied to a place in the document report none.
    pub fn positions(&self) -> Vec<Pos> {
        let pos1 = self.position1();

        if pos1 == Pos::default() {
            return vec![];
        }

        std::iter::once(pos1).chain(self.position2()).collect()
    }
}
