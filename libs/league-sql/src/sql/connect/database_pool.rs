// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use common::env_const::{
    DATABASE_URL, DEFAULT_CONNECTION_POOL_SIZE, LEAGUE_CONNECTION_POOL_SIZE,
    LEAGUE_POSTGRES_PASSWORD, LEAGUE_POSTGRES_URL, LEAGUE_POSTGRES_USER,
};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use league_env::{EnvError, Environment, parse_env_value};
use tokio_postgres::{Config, NoTls};

use crate::database_error::DatabaseError;

use super::database_client::DatabaseClient;

pub struct DatabasePool {
    pool: Pool,
}

impl DatabasePool {
    /// Create a pool from `LEAGUE_POSTGRES_URL` (or `DATABASE_URL`), applying the optional
    /// user/password overrides and `LEAGUE_CONNECTION_POOL_SIZE`.
    pub fn from_env(env: &dyn Environment) -> Result<Self, DatabaseError> {
        let url = env
            .get(LEAGUE_POSTGRES_URL)
            .or_else(|| env.get(DATABASE_URL))
            .ok_or(EnvError::Missing(LEAGUE_POSTGRES_URL))?;

        let user = env.get(LEAGUE_POSTGRES_USER);
        let password = env.get(LEAGUE_POSTGRES_PASSWORD);
        let pool_size = parse_env_value(
            env,
            LEAGUE_CONNECTION_POOL_SIZE,
            DEFAULT_CONNECTION_POOL_SIZE,
        )?;

        Self::from_db_url(&url, pool_size, user, password)
    }

    pub fn from_db_url(
        url: &str,
        pool_size: usize,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DatabaseError> {
        let mut config = Config::from_str(url).map_err(|e| {
            DatabaseError::Delegate(e)
                .with_context("Failed to parse PostgreSQL connection string".into())
        })?;

        if let Some(user) = &user {
            config.user(user);
        }
        if let Some(password) = &password {
            config.password(password);
        }

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(pool_size)
            .build()
            .map_err(|e| DatabaseError::Config(format!("Failed to create DB pool: {e}")))?;

        Ok(Self { pool })
    }

    pub async fn get_client(&self) -> Result<DatabaseClient, DatabaseError> {
        Ok(DatabaseClient::new(self.pool.get().await?))
    }

    /// Check out a connection and run a trivial query on it.
    pub async fn check_connection(&self) -> Result<(), DatabaseError> {
        let client = self.get_client().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}
