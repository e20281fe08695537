// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Env: {0}")]
    Env(#[from] league_env::EnvError),

    #[error("Delegate: {0}")]
    Delegate(#[from] tokio_postgres::Error),

    #[error("Pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<DatabaseError>),
}

impl DatabaseError {
    pub fn with_context(self, context: String) -> DatabaseError {
        DatabaseError::WithContext(context, Box::new(self))
    }
}
