// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex, MutexGuard};

use async_graphql_parser::{
    parse_query,
    types::{DocumentOperations, Selection, SelectionSet},
};
use async_trait::async_trait;
use core_resolver::{
    OperationsPayload,
    introspection::definition::schema::Schema,
    plugin::SubsystemGraphQLResolver,
    system_resolver::{GraphQLSystemResolver, OperationResponse, SystemResolutionError},
    validation::field::ValidatedField,
};
use league_model::sports::sports_subsystem;
use league_sql::{SqlExecutor, SqlRow, SqlStatement, database_error::DatabaseError};
use serde_json::{Value, json};

use crate::LeagueSubsystemResolver;

type Response = Box<dyn Fn() -> Result<Vec<SqlRow>, DatabaseError> + Send + Sync>;

/// Records every statement and answers each with the same canned response.
pub(crate) struct FakeExecutor {
    response: Response,
    statements: Mutex<Vec<SqlStatement>>,
}

impl FakeExecutor {
    pub fn returning(rows: Vec<SqlRow>) -> Self {
        Self {
            response: Box::new(move || Ok(rows.clone())),
            statements: Mutex::new(vec![]),
        }
    }

    pub fn failing(error: fn() -> DatabaseError) -> Self {
        Self {
            response: Box::new(move || Err(error())),
            statements: Mutex::new(vec![]),
        }
    }

    pub fn statements(&self) -> MutexGuard<'_, Vec<SqlStatement>> {
        self.statements.lock().unwrap()
    }
}

#[async_trait]
impl SqlExecutor for FakeExecutor {
    async fn query(&self, statement: SqlStatement) -> Result<Vec<SqlRow>, DatabaseError> {
        self.statements.lock().unwrap().push(statement);
        (self.response)()
    }
}

pub(crate) fn int_param(statement: &SqlStatement, index: usize) -> Option<i32> {
    statement.params[index].as_any().downcast_ref::<i32>().copied()
}

pub(crate) fn string_param(statement: &SqlStatement, index: usize) -> Option<String> {
    statement.params[index]
        .as_any()
        .downcast_ref::<String>()
        .cloned()
}

/// The league resolver behind a system resolver, as the server wires it.
pub(crate) struct TestServer {
    pub executor: Arc<FakeExecutor>,
    system_resolver: GraphQLSystemResolver,
}

impl TestServer {
    pub fn new(executor: FakeExecutor) -> Self {
        let executor = Arc::new(executor);
        let resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> = vec![Arc::new(
            LeagueSubsystemResolver::new(sports_subsystem(), executor.clone()),
        )];
        let schema = Arc::new(Schema::new_from_resolvers(&resolvers, true));

        Self {
            executor,
            system_resolver: GraphQLSystemResolver::new(resolvers, schema, 10, 15),
        }
    }

    pub async fn resolve(&self, query: &str) -> Result<OperationResponse, SystemResolutionError> {
        let payload = OperationsPayload::from_json(json!({ "query": query })).unwrap();
        self.system_resolver.resolve_operations(payload).await
    }

    pub async fn data(&self, query: &str) -> Value {
        let response = self.resolve(query).await.unwrap();

        Value::Object(
            response
                .into_iter()
                .map(|(name, result)| (name, result.unwrap().body))
                .collect(),
        )
    }

    pub async fn errors(&self, query: &str) -> Vec<String> {
        let response = self.resolve(query).await.unwrap();

        response
            .into_iter()
            .filter_map(|(_, result)| result.err().map(|error| error.message))
            .collect()
    }
}

/// The fields of a `{ ... }` selection, taken as is (no validation).
pub(crate) fn selection(query: &str) -> Vec<ValidatedField> {
    let document = parse_query(query).unwrap();

    match document.operations {
        DocumentOperations::Single(operation) => fields(&operation.node.selection_set.node),
        DocumentOperations::Multiple(_) => panic!("Expected a single operation"),
    }
}

fn fields(selection_set: &SelectionSet) -> Vec<ValidatedField> {
    selection_set
        .items
        .iter()
        .filter_map(|selection| match &selection.node {
            Selection::Field(field) => Some(ValidatedField {
                alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                name: field.node.name.node.clone(),
                arguments: field
                    .node
                    .arguments
                    .iter()
                    .map(|(name, value)| {
                        (name.node.to_string(), value.node.clone().into_const().unwrap())
                    })
                    .collect(),
                subfields: fields(&field.node.selection_set.node),
                pos: field.pos,
            }),
            _ => None,
        })
        .collect()
}
