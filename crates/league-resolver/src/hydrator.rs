// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Folds the flat rows of a [`SelectionPlan`](crate::selection_plan::SelectionPlan) back into
//! nested JSON.
//!
//! Rows are grouped by the unique key of the entity at each level (keeping the order in which
//! keys first appear). A `NULL` key means the `LEFT JOIN` found no row, so it contributes no
//! object.

use core_model::primitive_type::PrimitiveType;
use indexmap::IndexMap;
use league_model::types::Cardinality;
use league_sql::SqlRow;
use serde_json::{Map, Value};

use crate::selection_plan::{EntitySelection, SelectedField};

pub(crate) fn hydrate(
    selection: &EntitySelection<'_>,
    cardinality: Cardinality,
    rows: &[SqlRow],
) -> Value {
    let rows: Vec<&SqlRow> = rows.iter().collect();
    collect(hydrate_all(selection, &rows), cardinality)
}

fn collect(objects: Vec<Value>, cardinality: Cardinality) -> Value {
    match cardinality {
        Cardinality::One => objects.into_iter().next().unwrap_or(Value::Null),
        Cardinality::Many => Value::Array(objects),
    }
}

fn hydrate_all(selection: &EntitySelection<'_>, rows: &[&SqlRow]) -> Vec<Value> {
    let mut groups: IndexMap<String, Vec<&SqlRow>> = IndexMap::new();

    for row in rows {
        match row.get(selection.key_index) {
            None | Some(Value::Null) => {}
            Some(key) => groups.entry(key.to_string()).or_default().push(row),
        }
    }

    groups
        .values()
        .map(|group| hydrate_object(selection, group))
        .collect()
}

fn hydrate_object(selection: &EntitySelection<'_>, rows: &[&SqlRow]) -> Value {
    let first = rows.first();

    let object: Map<String, Value> = selection
        .fields
        .iter()
        .map(|field| match field {
            SelectedField::Column {
                output_name,
                index,
                graphql_type,
            } => {
                let value = first
                    .and_then(|row| row.get(*index))
                    .cloned()
                    .unwrap_or(Value::Null);
                (output_name.clone(), to_graphql_value(value, *graphql_type))
            }
            SelectedField::Typename { output_name } => (
                output_name.clone(),
                Value::String(selection.entity_type.name.clone()),
            ),
            SelectedField::Relation {
                output_name,
                cardinality,
                selection,
            } => (
                output_name.clone(),
                collect(hydrate_all(selection, rows), *cardinality),
            ),
        })
        .collect();

    Value::Object(object)
}

/// Integer columns exposed as `String` (such as `Player.id`) are rendered as text.
fn to_graphql_value(value: Value, graphql_type: PrimitiveType) -> Value {
    match (value, graphql_type) {
        (Value::Number(number), PrimitiveType::String) => Value::String(number.to_string()),
        (value, _) => value,
    }
}

#[cfg(test)]
mod tests {
    use league_model::sports::sports_subsystem;
    use serde_json::json;

    use crate::{selection_plan::SelectionPlan, test_utils::selection};

    use super::*;

    #[test]
    fn groups_joined_rows() {
        let subsystem = sports_subsystem();
        let team = subsystem.get_entity_type("Team").unwrap();
        let fields = selection("{ name players { id last_name } }");
        let plan = SelectionPlan::new(team, &fields, &subsystem).unwrap();

        // team__id, team__name, team__players__id, team__players__last_name
        let rows = vec![
            vec![json!(1), json!("Lions"), json!(10), json!("Ng")],
            vec![json!(1), json!("Lions"), json!(11), json!("Okafor")],
            vec![json!(2), json!("Tigers"), Value::Null, Value::Null],
        ];

        assert_eq!(
            hydrate(&plan.root, Cardinality::Many, &rows),
            json!([
                {
                    "name": "Lions",
                    "players": [
                        { "id": "10", "last_name": "Ng" },
                        { "id": "11", "last_name": "Okafor" }
                    ]
                },
                { "name": "Tigers", "players": [] }
            ])
        );
    }

    #[test]
    fn single_relations_and_typename() {
        let subsystem = sports_subsystem();
        let match_type = subsystem.get_entity_type("Match").unwrap();
        let fields = selection("{ id __typename winner { name } loser { name } }");
        let plan = SelectionPlan::new(match_type, &fields, &subsystem).unwrap();

        // match__id, match__winner__id, match__winner__name, match__loser__id, match__loser__name
        let rows = vec![vec![json!(3), json!(1), json!("Lions"), Value::Null, Value::Null]];

        assert_eq!(
            hydrate(&plan.root, Cardinality::One, &rows),
            json!({
                "id": 3,
                "__typename": "Match",
                "winner": { "name": "Lions" },
                "loser": null
            })
        );
    }

    #[test]
    fn no_rows() {
        let subsystem = sports_subsystem();
        let player = subsystem.get_entity_type("Player").unwrap();
        let plan = SelectionPlan::new(player, &selection("{ id }"), &subsystem).unwrap();

        assert_eq!(hydrate(&plan.root, Cardinality::One, &[]), Value::Null);
        assert_eq!(hydrate(&plan.root, Cardinality::Many, &[]), json!([]));
    }
}
