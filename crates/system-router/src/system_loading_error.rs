// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use league_env::EnvError;
use league_sql::database_error::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemLoadingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    EnvError(#[from] EnvError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
