// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use core_resolver::{
    QueryResponse,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::field::ValidatedField,
};
use league_model::subsystem::LeagueSubsystem;
use league_sql::SqlExecutor;
use serde_json::Value;

use crate::{league_mutation, league_query};

pub struct LeagueSubsystemResolver {
    pub id: &'static str,
    pub subsystem: LeagueSubsystem,
    pub executor: Arc<dyn SqlExecutor>,
}

impl LeagueSubsystemResolver {
    pub fn new(subsystem: LeagueSubsystem, executor: Arc<dyn SqlExecutor>) -> Self {
        Self {
            id: "league",
            subsystem,
            executor,
        }
    }
}

#[async_trait]
impl SubsystemGraphQLResolver for LeagueSubsystemResolver {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn resolve<'a>(
        &'a self,
        field: &'a ValidatedField,
        operation_type: OperationType,
    ) -> Result<Option<QueryResponse>, SubsystemResolutionError> {
        let operation_name = field.name.as_str();
        let executor = self.executor.as_ref();

        let body = match operation_type {
            OperationType::Query => {
                if let Some(query) = self.subsystem.get_static_query(operation_name) {
                    Some(Ok(Value::String(query.value.clone())))
                } else if let Some(query) = self.subsystem.get_query(operation_name) {
                    Some(league_query::resolve(query, field, &self.subsystem, executor).await)
                } else {
                    None
                }
            }
            OperationType::Mutation => match self.subsystem.get_mutation(operation_name) {
                Some(mutation) => {
                    Some(league_mutation::resolve(mutation, field, &self.subsystem, executor).await)
                }
                None => None,
            },
            OperationType::Subscription => None,
        };

        match body {
            Some(Ok(body)) => Ok(Some(QueryResponse::json(body))),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.subsystem.schema_queries()
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        self.subsystem.schema_mutations()
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        self.subsystem.schema_types()
    }
}

#[cfg(test)]
mod tests {
    use league_sql::database_error::DatabaseError;
    use serde_json::{Value, json};
    use test_log::test;

    use crate::test_utils::{FakeExecutor, TestServer, int_param, string_param};

    #[test(tokio::test)]
    async fn hello_skips_the_database() {
        let server = TestServer::new(FakeExecutor::returning(vec![]));

        assert_eq!(server.data("{ hello }").await, json!({ "hello": "Hello world!" }));
        assert!(server.executor.statements().is_empty());
    }

    #[test(tokio::test)]
    async fn players_with_their_team() {
        let server = TestServer::new(FakeExecutor::returning(vec![
            vec![json!(1), json!("Ada"), json!(5), json!("Lions")],
            vec![json!(2), json!("Grace"), Value::Null, Value::Null],
        ]));

        assert_eq!(
            server.data("{ players { id first_name team { name } } }").await,
            json!({
                "players": [
                    { "id": "1", "first_name": "Ada", "team": [{ "name": "Lions" }] },
                    { "id": "2", "first_name": "Grace", "team": [] }
                ]
            })
        );

        let statements = server.executor.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].sql.matches("LEFT JOIN").count(), 1);
    }

    #[test(tokio::test)]
    async fn single_team_by_id() {
        let server = TestServer::new(FakeExecutor::returning(vec![vec![
            json!(4),
            json!("Tigers"),
        ]]));

        assert_eq!(
            server.data("{ team(id: 4) { id name } }").await,
            json!({ "team": { "id": 4, "name": "Tigers" } })
        );

        let statements = server.executor.statements();
        assert_eq!(
            statements[0].sql,
            concat!(
                r#"SELECT "team"."id" AS "team__id", "team"."name" AS "team__name" "#,
                r#"FROM "team" WHERE "team"."id" = $1 ORDER BY "team"."id" ASC"#
            )
        );
        assert_eq!(int_param(&statements[0], 0), Some(4));
    }

    #[test(tokio::test)]
    async fn missing_match_is_null() {
        let server = TestServer::new(FakeExecutor::returning(vec![]));

        assert_eq!(
            server.data("{ match(id: 9) { winner { name } } }").await,
            json!({ "match": null })
        );
        assert!(server.executor.statements()[0].sql.contains(r#"WHERE "match"."id" = $1"#));
    }

    #[test(tokio::test)]
    async fn create_player() {
        let server = TestServer::new(FakeExecutor::returning(vec![vec![
            json!(12),
            json!("Lovelace"),
            json!(2),
            json!("Tigers"),
        ]]));

        assert_eq!(
            server
                .data(r#"mutation { player(first_name: "Ada", last_name: "Lovelace", team_id: 2) { id last_name team { name } } }"#)
                .await,
            json!({ "player": { "id": "12", "last_name": "Lovelace", "team": [{ "name": "Tigers" }] } })
        );

        let statements = server.executor.statements();
        assert_eq!(
            statements[0].sql,
            concat!(
                r#"WITH "inserted_player" AS (INSERT INTO "player" ("first_name", "last_name", "team_id") VALUES ($1, $2, $3) RETURNING *) "#,
                r#"SELECT "player"."id" AS "player__id", "player"."last_name" AS "player__last_name", "#,
                r#""t1"."id" AS "t1__id", "t1"."name" AS "t1__name" "#,
                r#"FROM "inserted_player" AS "player" "#,
                r#"LEFT JOIN "team" AS "t1" ON "player"."team_id" = "t1"."id" "#,
                r#"ORDER BY "player"."id" ASC, "t1"."id" ASC"#
            )
        );
        assert_eq!(string_param(&statements[0], 0).as_deref(), Some("Ada"));
        assert_eq!(string_param(&statements[0], 1).as_deref(), Some("Lovelace"));
        assert_eq!(int_param(&statements[0], 2), Some(2));
    }

    #[test(tokio::test)]
    async fn failed_insert_hides_the_database_error() {
        let server = TestServer::new(FakeExecutor::failing(|| {
            DatabaseError::UnexpectedResult("violates foreign key constraint".to_string())
        }));

        assert_eq!(
            server
                .errors(r#"mutation { player(first_name: "A", last_name: "B", team_id: 99) { id } }"#)
                .await,
            vec!["Failed to insert new player".to_string()]
        );
    }

    #[test(tokio::test)]
    async fn failed_read_reports_the_database_error() {
        let server = TestServer::new(FakeExecutor::failing(|| {
            DatabaseError::Config("relation \"team\" does not exist".to_string())
        }));

        assert_eq!(
            server.errors("{ teams { name } }").await,
            vec!["Configuration error: relation \"team\" does not exist".to_string()]
        );
    }

    #[test(tokio::test)]
    async fn invalid_mutation_arguments_skip_the_database() {
        let server = TestServer::new(FakeExecutor::returning(vec![]));

        let result = server
            .resolve(r#"mutation { player(first_name: "A", team_id: 1) { id } }"#)
            .await;
        match result {
            Err(core_resolver::system_resolver::SystemResolutionError::Validation(error)) => {
                assert_eq!(error.to_string(), "Required argument 'last_name' not found");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
        assert!(server.executor.statements().is_empty());
    }
}
