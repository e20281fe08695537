// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, insert::Insert, select::Select};

#[derive(Debug, PartialEq, Clone)]
pub struct WithQuery {
    /// The "WITH" expressions
    pub expressions: Vec<CteExpression>,
    /// The select statement reading from the expressions
    pub select: Select,
}

#[derive(Debug, PartialEq, Clone)]
pub struct CteExpression {
    pub name: String,
    pub operation: Insert,
}

impl ExpressionBuilder for WithQuery {
    /// Build a CTE for the `WITH <expressions> <select>` syntax.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("WITH ");
        builder.push_elems(&self.expressions, ", ");
        builder.push_space();
        self.select.build(builder);
    }
}

impl ExpressionBuilder for CteExpression {
    /// Build a CTE expression for the `<name> AS (<operation>)` syntax.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_identifier(&self.name);
        builder.push_str(" AS (");
        self.operation.build(builder);
        builder.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{
        column::{AliasedColumn, Column},
        predicate::ConcretePredicate,
        table::Table,
    };

    use super::*;

    #[test]
    fn insert_then_select() {
        let query = WithQuery {
            expressions: vec![CteExpression {
                name: "inserted_player".to_string(),
                operation: Insert {
                    table: "player".to_string(),
                    columns: vec![Column::physical("player", "team_id")],
                    values_seq: vec![vec![Column::param(4i32)]],
                    returning: vec![Column::Star(None)],
                },
            }],
            select: Select {
                table: Table::physical("inserted_player", Some("player".to_string())),
                columns: vec![AliasedColumn::new(
                    Column::physical("player", "id"),
                    "player__id",
                )],
                predicate: ConcretePredicate::True,
                order_by: None,
            },
        };

        assert_binding!(
            query.to_sql(),
            concat!(
                r#"WITH "inserted_player" AS (INSERT INTO "player" ("team_id") VALUES ($1) RETURNING *) "#,
                r#"SELECT "player"."id" AS "player__id" FROM "inserted_player" AS "player""#
            ),
            4i32
        );
    }
}
