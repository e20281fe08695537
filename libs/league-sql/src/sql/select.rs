// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, SQLBuilder, column::AliasedColumn, order::OrderBy,
    predicate::ConcretePredicate, table::Table,
};

/// A select statement
#[derive(Debug, PartialEq, Clone)]
pub struct Select {
    /// The table to select from (possibly a chain of joins)
    pub table: Table,
    pub columns: Vec<AliasedColumn>,
    /// The predicate to filter the rows
    pub predicate: ConcretePredicate,
    pub order_by: Option<OrderBy>,
}

impl ExpressionBuilder for Select {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("SELECT ");
        builder.push_elems(&self.columns, ", ");

        builder.push_str(" FROM ");
        self.table.build(builder);

        // Avoid correct, but inelegant "WHERE TRUE" clause
        if self.predicate != ConcretePredicate::True {
            builder.push_str(" WHERE ");
            self.predicate.build(builder);
        }
        if let Some(order_by) = &self.order_by {
            builder.push_space();
            order_by.build(builder);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{
        column::Column,
        order::{OrderByElement, Ordering},
    };

    use super::*;

    #[test]
    fn unfiltered() {
        let select = Select {
            table: Table::physical("team", None),
            columns: vec![
                AliasedColumn::new(Column::physical("team", "id"), "team__id"),
                AliasedColumn::new(Column::physical("team", "name"), "team__name"),
            ],
            predicate: ConcretePredicate::True,
            order_by: None,
        };

        assert_binding!(
            select.to_sql(),
            r#"SELECT "team"."id" AS "team__id", "team"."name" AS "team__name" FROM "team""#
        );
    }

    #[test]
    fn filtered_and_ordered() {
        let select = Select {
            table: Table::physical("player", None),
            columns: vec![Column::physical("player", "id").into()],
            predicate: ConcretePredicate::eq(Column::physical("player", "id"), Column::param(7i32)),
            order_by: Some(OrderBy(vec![OrderByElement(
                Column::physical("player", "id"),
                Ordering::Asc,
            )])),
        };

        assert_binding!(
            select.to_sql(),
            r#"SELECT "player"."id" FROM "player" WHERE "player"."id" = $1 ORDER BY "player"."id" ASC"#,
            7i32
        );
    }
}
