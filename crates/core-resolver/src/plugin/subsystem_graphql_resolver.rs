// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use thiserror::Error;

use crate::{QueryResponse, validation::field::ValidatedField};

/// Provides resolution of root operations for a subsystem, along with the schema elements it
/// contributes.
#[async_trait]
pub trait SubsystemGraphQLResolver: Sync {
    /// The id of the subsystem (for debugging purposes)
    fn id(&self) -> &'static str;

    /// Resolve an individual root field
    ///
    /// Returns `None` if the field is not handled by this subsystem
    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<QueryResponse>, SubsystemResolutionError>;

    // Support for schema creation (and in turn, validation)

    /// Queries supported by this subsystem
    fn schema_queries(&self) -> Vec<FieldDefinition>;

    /// Mutations supported by this subsystem
    fn schema_mutations(&self) -> Vec<FieldDefinition>;

    /// Types supported by this subsystem
    fn schema_types(&self) -> Vec<TypeDefinition>;
}

#[derive(Error, Debug)]
pub enum SubsystemResolutionError {
    #[error("Invalid field {0} for {1}")]
    InvalidField(String, &'static str), // (field name, container type)

    #[error("{0}")]
    UserDisplayError(String), // Error message to be displayed to the user (subsystems should hide internal errors through this)

    #[error("{0}")]
    Delegate(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SubsystemResolutionError {
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            SubsystemResolutionError::InvalidField(field_name, container_type) => {
                Some(format!("Invalid field {field_name} for {container_type}"))
            }
            SubsystemResolutionError::UserDisplayError(message) => Some(message.to_string()),
            SubsystemResolutionError::Delegate(_) => None,
        }
    }
}
