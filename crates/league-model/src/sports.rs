// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The league schema:
//!
//! ```graphql
//! type Team { id: Int, name: String, players: [Player] }
//! type Player { id: String, first_name: String, last_name: String, team: [Team] }
//! type Match { id: Int, loser: Team, winner: Team }
//!
//! type Query {
//!   hello: String
//!   players: [Player]
//!   player(id: Int!): Player
//!   teams: [Team]
//!   team(id: Int!): Team
//!   matches: [Match]
//!   match(id: Int!): Match
//! }
//!
//! type Mutation {
//!   player(first_name: String!, last_name: String!, team_id: Int!): Player
//! }
//! ```

use async_graphql_value::ConstValue;
use core_model::primitive_type::PrimitiveType;
use league_sql::{Column, ConcretePredicate, IntBits, PhysicalColumnType};

use crate::{
    Arguments,
    mutation::{CreateMutation, InsertColumn},
    query::{ArgumentParameter, EntityQuery, RootFilterFn, StaticQuery},
    subsystem::LeagueSubsystem,
    types::{Cardinality, ColumnField, EntityField, EntityFieldKind, EntityType, RelationField},
};

const INT4: PhysicalColumnType = PhysicalColumnType::Int { bits: IntBits::_32 };
const TEXT: PhysicalColumnType = PhysicalColumnType::String;

pub fn sports_subsystem() -> LeagueSubsystem {
    LeagueSubsystem {
        entity_types: vec![team_type(), player_type(), match_type()],
        static_queries: vec![StaticQuery {
            name: "hello".to_string(),
            value: "Hello world!".to_string(),
        }],
        queries: vec![
            entity_query("players", "Player", None),
            entity_query("player", "Player", Some(id_filter)),
            entity_query("teams", "Team", None),
            entity_query("team", "Team", Some(id_filter)),
            entity_query("matches", "Match", None),
            entity_query("match", "Match", Some(id_filter)),
        ],
        mutations: vec![create_player_mutation()],
    }
}

fn team_type() -> EntityType {
    EntityType {
        name: "Team".to_string(),
        table_name: "team".to_string(),
        unique_key: "id".to_string(),
        unique_key_type: INT4,
        fields: vec![
            column_field("id", INT4, PrimitiveType::Int),
            column_field("name", TEXT, PrimitiveType::String),
            relation_field("players", "Player", Cardinality::Many, team_players_join),
        ],
    }
}

fn player_type() -> EntityType {
    EntityType {
        name: "Player".to_string(),
        table_name: "player".to_string(),
        unique_key: "id".to_string(),
        unique_key_type: INT4,
        fields: vec![
            column_field("id", INT4, PrimitiveType::String),
            column_field("first_name", TEXT, PrimitiveType::String),
            column_field("last_name", TEXT, PrimitiveType::String),
            relation_field("team", "Team", Cardinality::Many, player_team_join),
        ],
    }
}

fn match_type() -> EntityType {
    EntityType {
        name: "Match".to_string(),
        table_name: "match".to_string(),
        unique_key: "id".to_string(),
        unique_key_type: INT4,
        fields: vec![
            column_field("id", INT4, PrimitiveType::Int),
            relation_field("loser", "Team", Cardinality::One, match_loser_join),
            relation_field("winner", "Team", Cardinality::One, match_winner_join),
        ],
    }
}

fn create_player_mutation() -> CreateMutation {
    let arguments = [
        ("first_name", PrimitiveType::String, TEXT),
        ("last_name", PrimitiveType::String, TEXT),
        ("team_id", PrimitiveType::Int, INT4),
    ];

    CreateMutation {
        name: "player".to_string(),
        entity_type: "Player".to_string(),
        parameters: arguments
            .iter()
            .map(|(name, typ, _)| ArgumentParameter::required(name, *typ))
            .collect(),
        columns: arguments
            .iter()
            .map(|(name, _, column_type)| InsertColumn {
                argument: name.to_string(),
                column_name: name.to_string(),
                column_type: *column_type,
            })
            .collect(),
        error_message: "Failed to insert new player".to_string(),
    }
}

fn column_field(name: &str, column_type: PhysicalColumnType, graphql_type: PrimitiveType) -> EntityField {
    EntityField {
        name: name.to_string(),
        kind: EntityFieldKind::Column(ColumnField {
            column_name: name.to_string(),
            column_type,
            graphql_type,
        }),
    }
}

fn relation_field(
    name: &str,
    target_type: &str,
    cardinality: Cardinality,
    join: crate::types::JoinPredicateFn,
) -> EntityField {
    EntityField {
        name: name.to_string(),
        kind: EntityFieldKind::Relation(RelationField {
            target_type: target_type.to_string(),
            cardinality,
            join,
        }),
    }
}

fn entity_query(name: &str, entity_type: &str, filter: Option<RootFilterFn>) -> EntityQuery {
    let (cardinality, parameters) = match filter {
        Some(_) => (
            Cardinality::One,
            vec![ArgumentParameter::required("id", PrimitiveType::Int)],
        ),
        None => (Cardinality::Many, vec![]),
    };

    EntityQuery {
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        cardinality,
        parameters,
        filter,
    }
}

fn column_eq(
    left_alias: &str,
    left_column: &str,
    right_alias: &str,
    right_column: &str,
) -> ConcretePredicate {
    ConcretePredicate::eq(
        Column::physical(left_alias, left_column),
        Column::physical(right_alias, right_column),
    )
}

fn team_players_join(team: &str, player: &str, _: &Arguments) -> ConcretePredicate {
    column_eq(team, "id", player, "team_id")
}

fn player_team_join(player: &str, team: &str, _: &Arguments) -> ConcretePredicate {
    column_eq(player, "team_id", team, "id")
}

fn match_loser_join(match_alias: &str, team: &str, _: &Arguments) -> ConcretePredicate {
    column_eq(match_alias, "loser_team_id", team, "id")
}

fn match_winner_join(match_alias: &str, team: &str, _: &Arguments) -> ConcretePredicate {
    column_eq(match_alias, "winner_team_id", team, "id")
}

/// `<alias>.id = $n`. Validation guarantees an in-range `id`; anything else matches nothing.
fn id_filter(table_alias: &str, arguments: &Arguments) -> ConcretePredicate {
    let id = match arguments.get("id") {
        Some(ConstValue::Number(number)) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };

    match id {
        Some(id) => ConcretePredicate::eq(Column::physical(table_alias, "id"), Column::param(id)),
        None => ConcretePredicate::False,
    }
}
