// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use super::{ExpressionBuilder, SQLParam};

/// Accumulates SQL text along with the parameters referenced by its `$n` placeholders.
pub struct SQLBuilder {
    sql: String,
    params: Vec<Arc<dyn SQLParam>>,
    /// Render columns as `"alias"."col"` (the default) or just `"col"` (needed inside INSERT column lists)
    fully_qualify_column_names: bool,
}

impl Default for SQLBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SQLBuilder {
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            fully_qualify_column_names: true,
        }
    }

    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push_str(s.as_ref());
    }

    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Push a double-quoted identifier. Quoting keeps names such as `match` (a keyword) and
    /// `player__team` usable verbatim.
    pub fn push_identifier<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push('"');
        self.sql.push_str(s.as_ref());
        self.sql.push('"');
    }

    pub fn push_column(&mut self, table_alias: &str, column_name: &str) {
        if self.fully_qualify_column_names {
            self.push_identifier(table_alias);
            self.push('.');
        }
        self.push_identifier(column_name);
    }

    pub fn push_space(&mut self) {
        self.sql.push(' ');
    }

    /// Push a `$n` placeholder and record the parameter it stands for.
    pub fn push_param(&mut self, param: Arc<dyn SQLParam>) {
        self.params.push(param);
        self.push('$');
        self.push_str(self.params.len().to_string());
    }

    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        push_elem: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            push_elem(self, item);

            if i + 1 < len {
                self.sql.push_str(sep);
            }
        }
    }

    pub fn push_elems<T: ExpressionBuilder>(&mut self, elems: &[T], sep: &str) {
        self.push_iter(elems.iter(), sep, |builder, elem| {
            elem.build(builder);
        });
    }

    pub fn into_sql(self) -> (String, Vec<Arc<dyn SQLParam>>) {
        (self.sql, self.params)
    }

    /// Run `func` with column names rendered without their table alias, then restore the previous mode.
    pub fn without_fully_qualified_column_names<F, R>(&mut self, func: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let current = self.fully_qualify_column_names;
        self.fully_qualify_column_names = false;
        let ret = func(self);
        self.fully_qualify_column_names = current;
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_numbered_in_push_order() {
        let mut builder = SQLBuilder::new();
        builder.push_column("player", "id");
        builder.push_str(" IN (");
        builder.push_iter([3, 7].into_iter(), ", ", |builder, value| {
            builder.push_param(Arc::new(value as i32))
        });
        builder.push(')');

        assert_binding!(
            builder.into_sql(),
            r#""player"."id" IN ($1, $2)"#,
            3i32,
            7i32
        );
    }

    #[test]
    fn unqualified_columns() {
        let mut builder = SQLBuilder::new();
        builder.without_fully_qualified_column_names(|builder| {
            builder.push_column("player", "first_name");
        });
        builder.push_space();
        builder.push_column("player", "last_name");

        assert_binding!(builder.into_sql(), r#""first_name" "player"."last_name""#);
    }
}
