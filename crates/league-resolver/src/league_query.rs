// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::validation::field::ValidatedField;
use league_model::{query::EntityQuery, subsystem::LeagueSubsystem};
use league_sql::{ConcretePredicate, SqlExecutor, SqlStatement, Table};
use serde_json::Value;
use tracing::instrument;

use crate::{
    hydrator::hydrate, league_execution_error::LeagueExecutionError,
    selection_plan::SelectionPlan,
};

/// Run a root entity query (`teams`, `player(id:)`, ...) as one statement.
#[instrument(name = "league_query::resolve", skip_all, fields(query = %query.name))]
pub(crate) async fn resolve(
    query: &EntityQuery,
    field: &ValidatedField,
    subsystem: &LeagueSubsystem,
    executor: &dyn SqlExecutor,
) -> Result<Value, LeagueExecutionError> {
    let entity_type = subsystem
        .get_entity_type(&query.entity_type)
        .ok_or_else(|| LeagueExecutionError::UnknownType(query.entity_type.clone()))?;

    let plan = SelectionPlan::new(entity_type, &field.subfields, subsystem)?;

    let predicate = query
        .filter
        .map(|filter| filter(plan.root_alias(), &field.arguments))
        .unwrap_or(ConcretePredicate::True);

    let select = plan.select(Table::physical(&entity_type.table_name, None), predicate);
    let statement = SqlStatement::new(&select, plan.result_types());

    let rows = executor.query(statement).await?;

    Ok(hydrate(&plan.root, query.cardinality, &rows))
}
