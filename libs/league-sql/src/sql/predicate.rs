// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, column::Column};

/// A boolean expression usable in a `WHERE` or `ON` clause.
#[derive(Debug, PartialEq, Clone)]
pub enum Predicate<C>
where
    C: PartialEq + ParamEquality,
{
    True,
    False,
    // Prefer Predicate::eq(), which simplifies the clause
    Eq(C, C),
}

pub type ConcretePredicate = Predicate<Column>;

impl<C> Predicate<C>
where
    C: PartialEq + ParamEquality,
{
    pub fn eq(lhs: C, rhs: C) -> Predicate<C> {
        if lhs == rhs {
            Predicate::True
        } else {
            match lhs.param_eq(&rhs) {
                Some(false) => Predicate::False,
                _ => Predicate::Eq(lhs, rhs),
            }
        }
    }
}

/// Compare two literal values ahead of execution.
///
/// Returns `None` unless both sides are parameters.
pub trait ParamEquality {
    fn param_eq(&self, other: &Self) -> Option<bool>;
}

impl ParamEquality for Column {
    fn param_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Column::Param(v1), Column::Param(v2)) => Some(v1 == v2),
            _ => None,
        }
    }
}

impl ExpressionBuilder for ConcretePredicate {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            ConcretePredicate::True => builder.push_str("TRUE"),
            ConcretePredicate::False => builder.push_str("FALSE"),
            ConcretePredicate::Eq(column1, column2) => {
                column1.build(builder);
                builder.push_str(" = ");
                column2.build(builder);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_predicates() {
        assert_binding!(ConcretePredicate::True.to_sql(), "TRUE");
        assert_binding!(ConcretePredicate::False.to_sql(), "FALSE");
    }

    #[test]
    fn eq_predicate() {
        let predicate = ConcretePredicate::eq(Column::physical("team", "id"), Column::param(3i32));

        assert_binding!(predicate.to_sql(), r#""team"."id" = $1"#, 3i32);
    }

    #[test]
    fn string_param() {
        let predicate = ConcretePredicate::eq(
            Column::physical("player", "first_name"),
            Column::param("Ada".to_string()),
        );

        assert_binding!(
            predicate.to_sql(),
            r#""player"."first_name" = $1"#,
            "Ada".to_string()
        );
    }

    #[test]
    fn simplification() {
        assert_eq!(
            ConcretePredicate::eq(Column::param(1i32), Column::param(1i32)),
            ConcretePredicate::True
        );
        assert_eq!(
            ConcretePredicate::eq(Column::param(1i32), Column::param(2i32)),
            ConcretePredicate::False
        );
        assert_eq!(
            ConcretePredicate::eq(
                Column::physical("match", "winner_team_id"),
                Column::physical("match", "winner_team_id"),
            ),
            ConcretePredicate::True
        );
    }
}
