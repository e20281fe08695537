// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;
use core_resolver::validation::field::ValidatedField;
use league_model::{
    Arguments,
    mutation::{CreateMutation, InsertColumn},
    subsystem::LeagueSubsystem,
    types::Cardinality,
};
use league_sql::{
    Column, ConcretePredicate, CteExpression, Insert, IntBits, PhysicalColumnType, SqlExecutor,
    SqlStatement, Table, WithQuery,
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    hydrator::hydrate,
    league_execution_error::{LeagueExecutionError, WithMessage},
    selection_plan::SelectionPlan,
};

/// Insert one row and read it back, with the requested relations, in the same statement:
///
/// ```sql
/// WITH "inserted_player" AS (INSERT INTO "player" (...) VALUES (...) RETURNING *)
/// SELECT ... FROM "inserted_player" AS "player" LEFT JOIN ...
/// ```
///
/// Any failure is reported as the mutation's error message.
#[instrument(name = "league_mutation::resolve", skip_all, fields(mutation = %mutation.name))]
pub(crate) async fn resolve(
    mutation: &CreateMutation,
    field: &ValidatedField,
    subsystem: &LeagueSubsystem,
    executor: &dyn SqlExecutor,
) -> Result<Value, LeagueExecutionError> {
    let entity_type = subsystem
        .get_entity_type(&mutation.entity_type)
        .ok_or_else(|| LeagueExecutionError::UnknownType(mutation.entity_type.clone()))?;

    let plan = SelectionPlan::new(entity_type, &field.subfields, subsystem)?;

    let values = mutation
        .columns
        .iter()
        .map(|column| insert_value(column, &field.arguments))
        .collect::<Result<Vec<_>, _>>()?;

    let cte_name = format!("inserted_{}", entity_type.table_name);

    let statement = WithQuery {
        expressions: vec![CteExpression {
            name: cte_name.clone(),
            operation: Insert {
                table: entity_type.table_name.clone(),
                columns: mutation
                    .columns
                    .iter()
                    .map(|column| Column::physical(&entity_type.table_name, &column.column_name))
                    .collect(),
                values_seq: vec![values],
                returning: vec![Column::Star(None)],
            },
        }],
        select: plan.select(
            Table::physical(cte_name, Some(plan.root_alias().to_string())),
            ConcretePredicate::True,
        ),
    };

    let rows = executor
        .query(SqlStatement::new(&statement, plan.result_types()))
        .await
        .map_err(LeagueExecutionError::Database)
        .with_message(&mutation.error_message)?;

    Ok(hydrate(&plan.root, Cardinality::One, &rows))
}

fn insert_value(column: &InsertColumn, arguments: &Arguments) -> Result<Column, LeagueExecutionError> {
    let missing = || LeagueExecutionError::MissingArgument(column.argument.clone());

    let value = arguments.get(&column.argument).ok_or_else(missing)?;

    match (&column.column_type, value) {
        (PhysicalColumnType::String, ConstValue::String(value)) => Ok(Column::param(value.clone())),
        (PhysicalColumnType::Int { bits }, ConstValue::Number(number)) => {
            let number = number.as_i64().ok_or_else(missing)?;
            let param = match bits {
                IntBits::_16 => i16::try_from(number).ok().map(Column::param),
                IntBits::_32 => i32::try_from(number).ok().map(Column::param),
                IntBits::_64 => Some(Column::param(number)),
            };
            param.ok_or_else(missing)
        }
        _ => Err(missing()),
    }
}
