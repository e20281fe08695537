// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{DocumentOperations, ExecutableDocument};
use async_graphql_value::Name;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::introspection::definition::schema::Schema;
use crate::validation::validation_error::ValidationError;

use super::{operation::ValidatedOperation, operation_validator::OperationValidator};

/// Context for validating a document.
pub struct DocumentValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    normal_query_depth_limit: usize,
    introspection_query_depth_limit: usize,
}

impl<'a> DocumentValidator<'a> {
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
        normal_query_depth_limit: usize,
        introspection_query_depth_limit: usize,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            normal_query_depth_limit,
            introspection_query_depth_limit,
        }
    }

    /// Validate the query payload.
    ///
    /// Validations performed:
    /// - Validate that either there is only one operation or the operation name specified matches one of the operations in the document
    /// - Validate that there is at least one operation
    /// - Other validations are delegated to the operation validator
    #[instrument(
        name = "DocumentValidator::validate"
        skip(self, document)
        )]
    pub fn validate(
        self,
        document: ExecutableDocument,
    ) -> Result<ValidatedOperation, ValidationError> {
        let (operation_name, raw_operation) = match document.operations {
            DocumentOperations::Single(operation) => Ok((self.operation_name, operation)),
            DocumentOperations::Multiple(mut operations) => match self.operation_name {
                // A named operation (`query Foo { ... }`) is parsed as `Multiple` even when it is
                // the only one, and the operation name is required only for truly multiple operations.
                None if operations.len() == 1 => operations
                    .into_iter()
                    .next()
                    .map(|(name, operation)| (Some(name.to_string()), operation))
                    .ok_or(ValidationError::NoOperationFound),
                None if operations.is_empty() => Err(ValidationError::NoOperationFound),
                None => Err(ValidationError::MultipleOperationsNoOperationName),
                Some(operation_name) => match operations.remove(&Name::new(&operation_name)) {
                    None => Err(ValidationError::MultipleOperationsUnmatchedOperationName(
                        operation_name,
                    )),
                    Some(operation) => Ok((Some(operation_name), operation)),
                },
            },
        }?;

        let operation_validator = OperationValidator::new(
            self.schema,
            operation_name,
            self.variables,
            document.fragments,
            self.normal_query_depth_limit,
            self.introspection_query_depth_limit,
        );

        operation_validator.validate(raw_operation)
    }
}
