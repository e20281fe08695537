// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Building blocks for generating and executing PostgreSQL statements.
//!
//! Each SQL construct (column, predicate, table, join, select, insert, CTE) implements
//! [ExpressionBuilder], which renders it into an [SQLBuilder] as SQL text with `$n` placeholders
//! and a matching list of bound parameters. Values never get interpolated into the SQL text.
//!
//! Executing a statement goes through the [SqlExecutor] trait. The production implementation,
//! [DatabaseExecutor], uses a `deadpool-postgres` pool and decodes each result row into JSON cells
//! according to the [PhysicalColumnType] declared for each selected column.

#[macro_use]
mod sql;

pub mod database_error;
mod executor;

pub use executor::{DatabaseExecutor, SqlExecutor, SqlRow, SqlStatement};
pub use sql::{
    SQLParam, SQLParamContainer,
    column::{AliasedColumn, Column},
    connect::{database_client::DatabaseClient, database_pool::DatabasePool},
    cte::{CteExpression, WithQuery},
    expression_builder::ExpressionBuilder,
    insert::Insert,
    join::LeftJoin,
    order::{OrderBy, OrderByElement, Ordering},
    physical_column::{IntBits, PhysicalColumnType},
    predicate::{ConcretePredicate, Predicate},
    select::Select,
    sql_builder::SQLBuilder,
    table::Table,
};
