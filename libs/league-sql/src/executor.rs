// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_postgres::{Row, types::ToSql};
use tracing::{debug, instrument};

use crate::{
    DatabasePool, ExpressionBuilder, IntBits, PhysicalColumnType, SQLParam,
    database_error::DatabaseError,
};

/// A single result row, one JSON cell per selected column.
pub type SqlRow = Vec<Value>;

/// A rendered statement ready to be executed.
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Arc<dyn SQLParam>>,
    /// How to decode each column of a result row
    pub result_types: Vec<PhysicalColumnType>,
}

impl SqlStatement {
    pub fn new(expression: &impl ExpressionBuilder, result_types: Vec<PhysicalColumnType>) -> Self {
        let mut builder = crate::SQLBuilder::new();
        expression.build(&mut builder);
        let (sql, params) = builder.into_sql();

        Self {
            sql,
            params,
            result_types,
        }
    }
}

impl std::fmt::Debug for SqlStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlStatement")
            .field("sql", &self.sql)
            .field("params", &self.params)
            .finish()
    }
}

/// Runs statements and returns decoded rows.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn query(&self, statement: SqlStatement) -> Result<Vec<SqlRow>, DatabaseError>;
}

pub struct DatabaseExecutor {
    pub database_pool: DatabasePool,
}

#[async_trait]
impl SqlExecutor for DatabaseExecutor {
    #[instrument(name = "DatabaseExecutor::query", skip_all)]
    async fn query(&self, statement: SqlStatement) -> Result<Vec<SqlRow>, DatabaseError> {
        debug!(sql = %statement.sql, params = ?statement.params, "Executing SQL");

        let client = self.database_pool.get_client().await?;

        let params: Vec<&(dyn ToSql + Sync)> =
            statement.params.iter().map(|param| param.as_pg()).collect();

        let rows = client.query(statement.sql.as_str(), &params).await?;

        rows.iter()
            .map(|row| decode_row(row, &statement.result_types))
            .collect()
    }
}

fn decode_row(row: &Row, result_types: &[PhysicalColumnType]) -> Result<SqlRow, DatabaseError> {
    if row.len() != result_types.len() {
        return Err(DatabaseError::UnexpectedResult(format!(
            "Expected {} columns, got {}",
            result_types.len(),
            row.len()
        )));
    }

    result_types
        .iter()
        .enumerate()
        .map(|(index, typ)| {
            let value = match typ {
                PhysicalColumnType::Int { bits: IntBits::_16 } => {
                    row.try_get::<_, Option<i16>>(index)?.map(Value::from)
                }
                PhysicalColumnType::Int { bits: IntBits::_32 } => {
                    row.try_get::<_, Option<i32>>(index)?.map(Value::from)
                }
                PhysicalColumnType::Int { bits: IntBits::_64 } => {
                    row.try_get::<_, Option<i64>>(index)?.map(Value::from)
                }
                PhysicalColumnType::String => {
                    row.try_get::<_, Option<String>>(index)?.map(Value::from)
                }
            };
            Ok(value.unwrap_or(Value::Null))
        })
        .collect()
}
