// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, join::LeftJoin};

#[derive(Debug, PartialEq, Clone)]
pub enum Table {
    /// A table (or CTE) such as `player`, optionally aliased as in `"team" AS "player__team"`.
    Physical { name: String, alias: Option<String> },
    Join(LeftJoin),
}

impl Table {
    pub fn physical(name: impl Into<String>, alias: Option<String>) -> Self {
        Table::Physical {
            name: name.into(),
            alias,
        }
    }
}

impl ExpressionBuilder for Table {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            Table::Physical { name, alias } => {
                builder.push_identifier(name);

                // Skip `"team" AS "team"`
                if let Some(alias) = alias
                    && alias != name
                {
                    builder.push_str(" AS ");
                    builder.push_identifier(alias);
                }
            }
            Table::Join(join) => join.build(builder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliasing() {
        assert_binding!(
            Table::physical("team", Some("team".to_string())).to_sql(),
            r#""team""#
        );
        assert_binding!(
            Table::physical("team", Some("player__team".to_string())).to_sql(),
            r#""team" AS "player__team""#
        );
    }
}
