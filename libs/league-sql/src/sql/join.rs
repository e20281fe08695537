// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, predicate::ConcretePredicate, table::Table};

#[derive(Debug, PartialEq, Clone)]
pub struct LeftJoin {
    /// The left table in the join such as `player`.
    left: Box<Table>,
    /// The right table in the join such as `team`.
    right: Box<Table>,
    /// The join predicate such as `player.team_id = player__team.id`.
    predicate: ConcretePredicate,
}

impl LeftJoin {
    pub fn new(left: Table, right: Table, predicate: ConcretePredicate) -> Self {
        LeftJoin {
            left: Box::new(left),
            right: Box::new(right),
            predicate,
        }
    }
}

impl ExpressionBuilder for LeftJoin {
    /// Build expression of the form `<left> LEFT JOIN <right> ON <predicate>`.
    fn build(&self, builder: &mut SQLBuilder) {
        self.left.build(builder);
        builder.push_str(" LEFT JOIN ");
        self.right.build(builder);
        builder.push_str(" ON ");
        self.predicate.build(builder);
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::column::Column;

    use super::*;

    #[test]
    fn nested_join() {
        let player_team = LeftJoin::new(
            Table::physical("player", None),
            Table::physical("team", Some("player__team".to_string())),
            ConcretePredicate::eq(
                Column::physical("player", "team_id"),
                Column::physical("player__team", "id"),
            ),
        );
        let team_players = LeftJoin::new(
            Table::Join(player_team),
            Table::physical("player", Some("player__team__players".to_string())),
            ConcretePredicate::eq(
                Column::physical("player__team", "id"),
                Column::physical("player__team__players", "team_id"),
            ),
        );

        assert_binding!(
            team_players.to_sql(),
            concat!(
                r#""player" LEFT JOIN "team" AS "player__team" ON "player"."team_id" = "player__team"."id""#,
                r#" LEFT JOIN "player" AS "player__team__players" ON "player__team"."id" = "player__team__players"."team_id""#
            )
        );
    }
}
