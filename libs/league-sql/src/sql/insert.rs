// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, column::Column};

#[derive(Debug, PartialEq, Clone)]
pub struct Insert {
    pub table: String,
    /// The columns to insert into such as `(first_name, last_name)`
    pub columns: Vec<Column>,
    /// One entry per inserted row
    pub values_seq: Vec<Vec<Column>>,
    pub returning: Vec<Column>,
}

impl ExpressionBuilder for Insert {
    /// Build `INSERT INTO <table> (<columns>) VALUES (<values>) RETURNING <returning-columns>`.
    /// The `RETURNING` clause is omitted if there is nothing to return.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("INSERT INTO ");
        builder.push_identifier(&self.table);

        if self.columns.is_empty() {
            builder.push_str(" DEFAULT VALUES");
        } else {
            builder.push_str(" (");
            builder.without_fully_qualified_column_names(|builder| {
                builder.push_elems(&self.columns, ", ");
            });

            builder.push_str(") VALUES (");
            builder.push_iter(self.values_seq.iter(), "), (", |builder, values| {
                builder.push_elems(values, ", ");
            });
            builder.push(')');
        }

        if !self.returning.is_empty() {
            builder.push_str(" RETURNING ");
            builder.push_elems(&self.returning, ", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row() {
        let insert = Insert {
            table: "player".to_string(),
            columns: vec![
                Column::physical("player", "first_name"),
                Column::physical("player", "last_name"),
                Column::physical("player", "team_id"),
            ],
            values_seq: vec![vec![
                Column::param("Ada".to_string()),
                Column::param("Lovelace".to_string()),
                Column::param(2i32),
            ]],
            returning: vec![Column::Star(None)],
        };

        assert_binding!(
            insert.to_sql(),
            r#"INSERT INTO "player" ("first_name", "last_name", "team_id") VALUES ($1, $2, $3) RETURNING *"#,
            "Ada".to_string(),
            "Lovelace".to_string(),
            2i32
        );
    }
}
