// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::plugin::SubsystemResolutionError;
use league_sql::database_error::DatabaseError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum LeagueExecutionError {
    #[error("Field '{0}' is not valid for type '{1}'")]
    Validation(String, String),

    #[error("Type '{0}' is not defined")]
    UnknownType(String),

    #[error("Missing argument '{0}'")]
    MissingArgument(String),

    #[error("{0}")]
    Database(#[from] DatabaseError),

    /// Reported as the given message; the source is only logged
    #[error("{0}")]
    WithMessage(String, #[source] Box<LeagueExecutionError>),
}

impl LeagueExecutionError {
    pub fn with_message(self, message: impl Into<String>) -> LeagueExecutionError {
        LeagueExecutionError::WithMessage(message.into(), Box::new(self))
    }

    pub fn user_error_message(&self) -> String {
        match self {
            LeagueExecutionError::Database(DatabaseError::Delegate(e)) => e
                .as_db_error()
                .map(|db_error| db_error.message().to_string())
                .unwrap_or_else(|| e.to_string()),
            LeagueExecutionError::WithMessage(message, source) => {
                error!("{message}: {source:?}");
                message.clone()
            }
            _ => self.to_string(),
        }
    }
}

impl From<LeagueExecutionError> for SubsystemResolutionError {
    fn from(e: LeagueExecutionError) -> Self {
        SubsystemResolutionError::UserDisplayError(e.user_error_message())
    }
}

pub(crate) trait WithMessage {
    fn with_message(self, message: &str) -> Self;
}

impl<T> WithMessage for Result<T, LeagueExecutionError> {
    fn with_message(self, message: &str) -> Result<T, LeagueExecutionError> {
        self.map_err(|e| e.with_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        let unreachable = LeagueExecutionError::Database(DatabaseError::Config(
            "Connection refused".to_string(),
        ));
        assert_eq!(
            unreachable.user_error_message(),
            "Configuration error: Connection refused"
        );

        let hidden = LeagueExecutionError::Database(DatabaseError::UnexpectedResult(
            "violates foreign key constraint".to_string(),
        ))
        .with_message("Failed to insert new player");
        assert_eq!(hidden.user_error_message(), "Failed to insert new player");

        let resolution_error: SubsystemResolutionError = hidden.into();
        assert_eq!(
            resolution_error.user_error_message().as_deref(),
            Some("Failed to insert new player")
        );
    }
}
