// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, SQLParam, SQLParamContainer};

/// Anything that may appear where a column can: in a select list, on either side of a predicate,
/// or as a value in an insert.
#[derive(Debug, PartialEq, Clone)]
pub enum Column {
    /// A column of the table (or CTE) known under `table_alias` in the current statement
    Physical {
        table_alias: String,
        name: String,
    },
    /// A literal value, always rendered as a `$n` placeholder
    Param(SQLParamContainer),
    /// `*` or `"alias".*`
    Star(Option<String>),
}

impl Column {
    pub fn physical(table_alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Physical {
            table_alias: table_alias.into(),
            name: name.into(),
        }
    }

    pub fn param<T: SQLParam + 'static>(value: T) -> Self {
        Self::Param(SQLParamContainer::new(value))
    }
}

impl ExpressionBuilder for Column {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            Column::Physical { table_alias, name } => builder.push_column(table_alias, name),
            Column::Param(value) => builder.push_param(value.param()),
            Column::Star(table_alias) => {
                if let Some(table_alias) = table_alias {
                    builder.push_identifier(table_alias);
                    builder.push('.');
                }
                builder.push('*');
            }
        }
    }
}

/// A select-list entry, optionally renamed with `AS`.
#[derive(Debug, PartialEq, Clone)]
pub struct AliasedColumn {
    pub column: Column,
    pub alias: Option<String>,
}

impl AliasedColumn {
    pub fn new(column: Column, alias: impl Into<String>) -> Self {
        Self {
            column,
            alias: Some(alias.into()),
        }
    }
}

impl From<Column> for AliasedColumn {
    fn from(column: Column) -> Self {
        Self {
            column,
            alias: None,
        }
    }
}

impl ExpressionBuilder for AliasedColumn {
    fn build(&self, builder: &mut SQLBuilder) {
        self.column.build(builder);
        if let Some(alias) = &self.alias {
            builder.push_str(" AS ");
            builder.push_identifier(alias);
        }
    }
}
