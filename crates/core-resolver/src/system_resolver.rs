// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::pin::pin;
use std::sync::Arc;

use async_graphql_parser::{
    Pos,
    types::{ExecutableDocument, OperationType},
};
use futures::StreamExt;
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::{
    FieldResolver, OperationsPayload, QueryResponse,
    introspection::definition::schema::Schema,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    validation::{
        document_validator::DocumentValidator, field::ValidatedField,
        operation::ValidatedOperation, validation_error::ValidationError,
    },
};

/// An error attached to one root field. The field is `null` in the response `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub message: String,
    pub path: Vec<String>,
    pub locations: Vec<Pos>,
}

/// The result of each root field, keyed by output name, in document order.
pub type OperationResponse = Vec<(String, Result<QueryResponse, FieldError>)>;

/// The top-level system resolver.
///
/// Delegates to subsystem resolvers to resolve individual operations.
pub struct GraphQLSystemResolver {
    subsystem_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
    pub schema: Arc<Schema>,
    normal_query_depth_limit: usize,
    introspection_query_depth_limit: usize,
}

impl GraphQLSystemResolver {
    pub fn new(
        subsystem_resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>>,
        schema: Arc<Schema>,
        normal_query_depth_limit: usize,
        introspection_query_depth_limit: usize,
    ) -> Self {
        Self {
            subsystem_resolvers,
            schema,
            normal_query_depth_limit,
            introspection_query_depth_limit,
        }
    }

    /// Validate and then resolve the operation in the payload.
    pub async fn resolve_operations(
        &self,
        operations_payload: OperationsPayload,
    ) -> Result<OperationResponse, SystemResolutionError> {
        let operation = self.validate_operation(operations_payload)?;
        Ok(self.resolve_operation(&operation).await)
    }

    /// Resolve root fields one after the other in document order. A failing field doesn't stop
    /// the others: its error is reported next to the other fields' values.
    #[instrument(
        name = "SystemResolver::resolve_operation"
        skip_all
        fields(operation_name = ?operation.name)
        )]
    pub async fn resolve_operation(&self, operation: &ValidatedOperation) -> OperationResponse {
        let mut response = Vec::with_capacity(operation.fields.len());

        for field in &operation.fields {
            let output_name = field.output_name();

            let result = operation.resolve_field(field, self).await.map_err(|err| {
                error!(%err, field = %output_name, "Failed to resolve field");
                FieldError {
                    message: err.user_error_message(),
                    path: vec![output_name.clone()],
                    locations: vec![field.pos],
                }
            });

            response.push((output_name, result));
        }

        response
    }

    pub(crate) async fn resolve_root_field(
        &self,
        operation_type: OperationType,
        field: &ValidatedField,
    ) -> Result<QueryResponse, SystemResolutionError> {
        let stream = futures::stream::iter(self.subsystem_resolvers.iter())
            .then(|resolver| resolver.resolve(field, operation_type));

        let mut stream = pin!(stream);

        // Really a find_map(), but StreamExt::find_map() is not available
        while let Some(next_val) = stream.next().await {
            if let Some(val) = next_val? {
                // Found a resolver that could return a value (or an error), so we are done resolving
                return Ok(val);
            }
        }

        Err(SystemResolutionError::NoResolverFound)
    }

    #[instrument(skip_all)]
    pub fn validate_operation(
        &self,
        operations_payload: OperationsPayload,
    ) -> Result<ValidatedOperation, SystemResolutionError> {
        let query = operations_payload
            .query
            .ok_or(RequestError::MissingQuery)?;

        let document = parse_query(&query)?;

        let document_validator = DocumentValidator::new(
            &self.schema,
            operations_payload.operation_name,
            operations_payload.variables,
            self.normal_query_depth_limit,
            self.introspection_query_depth_limit,
        );

        Ok(document_validator.validate(document)?)
    }
}

#[instrument(name = "system_resolver::parse_query")]
fn parse_query(query: &str) -> Result<ExecutableDocument, ValidationError> {
    async_graphql_parser::parse_query(query).map_err(|error| {
        warn!(%error, "Failed to parse query");
        let (message, pos1, pos2) = match error {
            async_graphql_parser::Error::Syntax {
                message,
                start,
                end,
            } => (format!("Syntax error: {}", message.trim()), start, end),
            async_graphql_parser::Error::MultipleRoots { root, schema, pos } => {
                (format!("Multiple roots of {root} type"), schema, Some(pos))
            }
            async_graphql_parser::Error::MissingQueryRoot { pos } => {
                ("Missing query root".to_string(), pos, None)
            }
            async_graphql_parser::Error::MultipleOperations {
                anonymous,
                operation,
            } => (
                "Multiple operations".to_string(),
                anonymous,
                Some(operation),
            ),
            async_graphql_parser::Error::OperationDuplicated {
                operation: _,
                first,
                second,
            } => ("Operation duplicated".to_string(), first, Some(second)),
            async_graphql_parser::Error::FragmentDuplicated {
                fragment,
                first,
                second,
            } => (
                format!("Fragment {fragment} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::MissingOperation => {
                ("Missing operation".to_string(), Pos::default(), None)
            }
            _ => ("Unknown error".to_string(), Pos::default(), None),
        };

        ValidationError::QueryParsingFailed(message, pos1, pos2)
    })
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid body JSON {0}")]
    InvalidBodyJson(serde_json::Error),

    #[error("Must provide query string.")]
    MissingQuery,
}

#[derive(Error, Debug)]
pub enum SystemResolutionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("No subsystem resolver found")]
    NoResolverFound,

    #[error("{0}")]
    SubsystemResolutionError(#[from] SubsystemResolutionError),

    #[error("Invalid request {0}")]
    RequestError(#[from] RequestError),
}

impl SystemResolutionError {
    // Message that should be emitted when the error is returned to the user.
    // This should hide any internal details of the error.
    pub fn user_error_message(&self) -> String {
        self.explicit_message()
            .unwrap_or_else(|| "Internal server error".to_string())
    }

    pub fn explicit_message(&self) -> Option<String> {
        match self {
            SystemResolutionError::Validation(error) => Some(error.to_string()),
            SystemResolutionError::SubsystemResolutionError(error) => error.user_error_message(),
            SystemResolutionError::RequestError(error) => Some(error.to_string()),
            SystemResolutionError::NoResolverFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use test_log::test;

    use crate::test_support::{league_resolvers, league_schema};

    use super::*;

    fn system_resolver() -> GraphQLSystemResolver {
        GraphQLSystemResolver::new(league_resolvers(), Arc::new(league_schema()), 3, 15)
    }

    fn payload(query: &str, variables: Option<Value>) -> OperationsPayload {
        OperationsPayload {
            operation_name: None,
            query: Some(query.to_string()),
            variables: variables.and_then(|v| v.as_object().cloned()),
        }
    }

    fn validation_message(query: &str) -> String {
        system_resolver()
            .validate_operation(payload(query, None))
            .unwrap_err()
            .user_error_message()
    }

    #[test(tokio::test)]
    async fn partial_failure() {
        let response = system_resolver()
            .resolve_operations(payload(
                "query($id: Int!) { hello team(id: $id) { id } teams { id } }",
                Some(json!({ "id": 4 })),
            ))
            .await
            .unwrap();

        assert_eq!(response.len(), 3);

        assert_eq!(response[0].0, "hello");
        assert_eq!(
            response[0].1.as_ref().unwrap().body,
            json!("Hello world!")
        );

        assert_eq!(response[1].0, "team");
        assert_eq!(response[1].1.as_ref().unwrap().body, json!({ "id": 4 }));

        assert_eq!(response[2].0, "teams");
        let error = response[2].1.as_ref().unwrap_err();
        assert_eq!(error.message, "Database unavailable");
        assert_eq!(error.path, vec!["teams".to_string()]);
        assert_eq!(error.locations, vec![Pos { line: 1, column: 47 }]);
    }

    #[test(tokio::test)]
    async fn unresolved_field() {
        // No resolver answers introspection in this system
        let response = system_resolver()
            .resolve_operations(payload("{ __typename }", None))
            .await
            .unwrap();

        assert_eq!(
            response[0].1.as_ref().unwrap_err().message,
            "Internal server error"
        );
    }

    #[test]
    fn validation_errors() {
        insta::assert_snapshot!(
            validation_message("{ players { nickname } }"),
            @"Field 'nickname' is not valid for type 'Player'"
        );
        insta::assert_snapshot!(
            validation_message("{ players }"),
            @"Field 'players' of type 'Player' must have a selection of subfields"
        );
        insta::assert_snapshot!(
            validation_message("{ hello { id } }"),
            @"Field 'hello' is of a scalar type, which should not specify fields"
        );
        insta::assert_snapshot!(
            validation_message("{ players { ...teamFields } } fragment teamFields on Team { id }"),
            @"Fragment 'teamFields' cannot be spread on type 'Player'"
        );
        insta::assert_snapshot!(
            validation_message("{ players { ...missing } }"),
            @"Fragment definition 'missing' not found"
        );
        insta::assert_snapshot!(
            validation_message("{ players { ... on Player { id } } }"),
            @"Inline fragments are not supported"
        );
        insta::assert_snapshot!(
            validation_message("{ players { id: first_name id } }"),
            @"Fields with output name 'id' select different fields or arguments"
        );
        insta::assert_snapshot!(
            validation_message("subscription { players { id } }"),
            @"Subscriptions are not supported"
        );
        insta::assert_snapshot!(
            validation_message("query($id: Int!) { team(id: $id) { id } }"),
            @"Variable 'id' not found"
        );
    }

    #[test]
    fn parse_errors() {
        let error = system_resolver()
            .validate_operation(payload("{ players { id }", None))
            .unwrap_err();

        match error {
            SystemResolutionError::Validation(error @ ValidationError::QueryParsingFailed(..)) => {
                assert!(error.to_string().starts_with("Syntax error:"));
                assert!(!error.positions().is_empty());
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(matches!(
            system_resolver().validate_operation(OperationsPayload {
                operation_name: None,
                query: None,
                variables: None,
            }),
            Err(SystemResolutionError::RequestError(RequestError::MissingQuery))
        ));
    }

    #[test]
    fn fragments_are_inlined_and_fields_merged() {
        let operation = system_resolver()
            .validate_operation(payload(
                r#"
                query {
                    teams {
                        ...teamFields
                        players { first_name }
                        players { last_name }
                        roster: players { id }
                    }
                }

                fragment teamFields on Team {
                    id
                    name
                }
                "#,
                None,
            ))
            .unwrap();

        let teams = &operation.fields[0];
        let subfield_names: Vec<_> = teams.subfields.iter().map(|f| f.output_name()).collect();
        assert_eq!(subfield_names, vec!["id", "name", "players", "roster"]);

        let players: Vec<_> = teams.subfields[2]
            .subfields
            .iter()
            .map(|f| f.output_name())
            .collect();
        assert_eq!(players, vec!["first_name", "last_name"]);
    }

    #[test]
    fn fragment_recursion() {
        insta::assert_snapshot!(
            validation_message(
                r#"
                query { teams { ...a } }
                fragment a on Team { ...b }
                fragment b on Team { ...a }
                "#
            ),
            @"Fragment 'a' spreads itself"
        );
    }

    #[test]
    fn query_depth_limit() {
        // The limit is 3 for data queries and 15 for introspection
        assert!(
            system_resolver()
                .validate_operation(payload("{ teams { players { team { id } } } }", None))
                .is_err()
        );
        assert!(
            system_resolver()
                .validate_operation(payload("{ teams { players { id } } }", None))
                .is_ok()
        );
        assert!(
            system_resolver()
                .validate_operation(payload(
                    "{ __schema { types { fields { type { ofType { name } } } } } }",
                    None
                ))
                .is_ok()
        );
        insta::assert_snapshot!(
            validation_message("{ matches { winner { players { id } } } }"),
            @"Selection set too deep"
        );
    }

    #[test]
    fn multiple_operations() {
        let query = "query A { hello } query B { teams { id } }";

        let resolver = system_resolver();
        let operation = resolver
            .validate_operation(OperationsPayload {
                operation_name: Some("B".to_string()),
                query: Some(query.to_string()),
                variables: None,
            })
            .unwrap();
        assert_eq!(operation.name.as_deref(), Some("B"));
        assert_eq!(operation.fields[0].name.as_str(), "teams");

        insta::assert_snapshot!(
            validation_message(query),
            @"Must provide operation name if query contains multiple operations"
        );
    }

    #[test]
    fn mutations_require_the_mutation_root() {
        let resolver = GraphQLSystemResolver::new(
            league_resolvers(),
            Arc::new(crate::test_support::league_schema_with(false)),
            10,
            15,
        );

        let error = resolver
            .validate_operation(payload(
                r#"mutation { player(first_name: "A", last_name: "B", team_id: 1) { id } }"#,
                None,
            ))
            .unwrap_err();

        insta::assert_snapshot!(error.user_error_message(), @"No such operation 'Mutation'");
    }
}
