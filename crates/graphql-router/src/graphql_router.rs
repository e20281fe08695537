// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::{Pos, types::OperationType};
use async_stream::try_stream;
use async_trait::async_trait;
use bytes::Bytes;
use common::{
    env_const::get_graphql_http_path,
    http::{Headers, RequestHead, RequestPayload, ResponseBody, ResponsePayload},
    router::Router,
};
use core_resolver::{
    OperationsPayload,
    system_resolver::{FieldError, GraphQLSystemResolver, RequestError, SystemResolutionError},
};
use http::StatusCode;
use league_env::Environment;
use serde_json::{Value, json};
use tracing::instrument;

/// Serves GraphQL over `POST` (JSON body) and `GET` (query-string parameters) at the GraphQL
/// path. Mutations are only accepted over `POST`.
pub struct GraphQLRouter {
    system_resolver: Arc<GraphQLSystemResolver>,
    env: Arc<dyn Environment>,
}

impl GraphQLRouter {
    pub fn new(system_resolver: Arc<GraphQLSystemResolver>, env: Arc<dyn Environment>) -> Self {
        Self {
            system_resolver,
            env,
        }
    }

    fn suitable(&self, request_head: &(dyn RequestHead + Send + Sync)) -> bool {
        let method = request_head.get_method();

        request_head.get_path() == get_graphql_http_path(self.env.as_ref())
            && (method == http::Method::POST || method == http::Method::GET)
    }
}

#[async_trait]
impl Router for GraphQLRouter {
    /// Resolve an incoming operation, returning a JSON response stream. The JSON holds the data
    /// returned by each root field and, if any failed, their errors. A request that cannot be
    /// parsed or validated gets a `400` with only the errors.
    #[instrument(name = "GraphQLRouter::route", skip_all)]
    async fn route(
        &self,
        request: &(dyn RequestPayload + Send + Sync),
    ) -> Option<ResponsePayload> {
        let request_head = request.get_head();

        if !self.suitable(request_head) {
            return None;
        }

        let is_get = request_head.get_method() == http::Method::GET;

        let payload = if is_get {
            request_head.get_query()
        } else {
            request.take_body()
        };

        let operation = OperationsPayload::from_json(payload)
            .map_err(|e| SystemResolutionError::RequestError(RequestError::InvalidBodyJson(e)))
            .and_then(|payload| self.system_resolver.validate_operation(payload));

        let operation = match operation {
            Ok(operation) => operation,
            Err(err) => {
                tracing::warn!("Rejected request: {err}");
                return Some(error_response(&err));
            }
        };

        if is_get && operation.typ == OperationType::Mutation {
            return Some(json_response(
                StatusCode::METHOD_NOT_ALLOWED,
                errors_body(vec![json!({
                    "message": "Can only perform a mutation operation from a POST request."
                })]),
                vec![(http::header::ALLOW.to_string(), "POST".to_string())],
            ));
        }

        let response = self.system_resolver.resolve_operation(&operation).await;

        let stream = try_stream! {
            yield Bytes::from_static(br#"{"data": {"#);

            for (index, (name, result)) in response.iter().enumerate() {
                if index != 0 {
                    yield Bytes::from_static(b", ");
                }
                yield Bytes::from(Value::String(name.clone()).to_string());
                yield Bytes::from_static(b": ");
                match result {
                    Ok(query_response) => yield Bytes::from(query_response.body.to_string()),
                    Err(_) => yield Bytes::from_static(b"null"),
                }
            }
            yield Bytes::from_static(b"}");

            let mut errors = response.iter().filter_map(|(_, result)| result.as_ref().err()).peekable();

            if errors.peek().is_some() {
                yield Bytes::from_static(br#", "errors": ["#);
                for (index, error) in errors.enumerate() {
                    if index != 0 {
                        yield Bytes::from_static(b", ");
                    }
                    yield Bytes::from(field_error_json(error).to_string());
                }
                yield Bytes::from_static(b"]");
            }

            yield Bytes::from_static(b"}");
        };

        Some(ResponsePayload {
            body: ResponseBody::Stream(Box::pin(stream)),
            headers: json_headers(vec![]),
            status_code: StatusCode::OK,
        })
    }
}

fn error_response(err: &SystemResolutionError) -> ResponsePayload {
    let mut error = json!({ "message": err.user_error_message() });

    if let SystemResolutionError::Validation(validation_error) = err {
        let positions = validation_error.positions();
        if !positions.is_empty() {
            error["locations"] = locations_json(&positions);
        }
    }

    let status_code = match err {
        SystemResolutionError::Validation(_) | SystemResolutionError::RequestError(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    json_response(status_code, errors_body(vec![error]), vec![])
}

fn field_error_json(error: &FieldError) -> Value {
    json!({
        "message": error.message,
        "locations": locations_json(&error.locations),
        "path": error.path,
    })
}

fn locations_json(positions: &[Pos]) -> Value {
    positions
        .iter()
        .map(|pos| json!({ "line": pos.line, "column": pos.column }))
        .collect()
}

fn errors_body(errors: Vec<Value>) -> Value {
    json!({ "errors": errors })
}

fn json_headers(extra: Vec<(String, String)>) -> Headers {
    let mut headers = Headers::from_vec(extra);
    headers.insert(
        http::header::CONTENT_TYPE.to_string(),
        "application/json".to_string(),
    );
    headers
}

fn json_response(
    status_code: StatusCode,
    body: Value,
    extra_headers: Vec<(String, String)>,
) -> ResponsePayload {
    ResponsePayload {
        body: ResponseBody::Bytes(body.to_string().into_bytes()),
        headers: json_headers(extra_headers),
        status_code,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_graphql_parser::types::{FieldDefinition, TypeDefinition};
    use core_resolver::{
        QueryResponse,
        introspection::definition::schema::Schema,
        plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
        validation::field::ValidatedField,
    };
    use league_env::MapEnvironment;
    use league_model::{sports::sports_subsystem, subsystem::LeagueSubsystem};
    use test_log::test;

    use super::*;

    /// Answers `hello` and `player` (the mutation); `teams` always fails.
    struct StubResolver(LeagueSubsystem);

    #[async_trait]
    impl SubsystemGraphQLResolver for StubResolver {
        fn id(&self) -> &'static str {
            "stub"
        }

        async fn resolve<'a>(
            &'a self,
            field: &'a ValidatedField,
            operation_type: OperationType,
        ) -> Result<Option<QueryResponse>, SubsystemResolutionError> {
            match (operation_type, field.name.as_str()) {
                (OperationType::Query, "hello") => {
                    Ok(Some(QueryResponse::json(json!("Hello world!"))))
                }
                (OperationType::Mutation, "player") => {
                    Ok(Some(QueryResponse::json(json!({ "id": "1" }))))
                }
                (_, "teams") => Err(SubsystemResolutionError::UserDisplayError(
                    "connection refused".to_string(),
                )),
                _ => Ok(None),
            }
        }

        fn schema_queries(&self) -> Vec<FieldDefinition> {
            self.0.schema_queries()
        }

        fn schema_mutations(&self) -> Vec<FieldDefinition> {
            self.0.schema_mutations()
        }

        fn schema_types(&self) -> Vec<TypeDefinition> {
            self.0.schema_types()
        }
    }

    struct TestRequest {
        method: http::Method,
        path: String,
        query: Value,
        body: Mutex<Value>,
    }

    impl TestRequest {
        fn post(body: Value) -> Self {
            Self {
                method: http::Method::POST,
                path: "/api".to_string(),
                query: json!({}),
                body: Mutex::new(body),
            }
        }

        fn get(query: Value) -> Self {
            Self {
                method: http::Method::GET,
                path: "/api".to_string(),
                query,
                body: Mutex::new(Value::Null),
            }
        }
    }

    impl RequestHead for TestRequest {
        fn get_headers(&self, _key: &str) -> Vec<String> {
            vec![]
        }

        fn get_path(&self) -> String {
            self.path.clone()
        }

        fn get_query(&self) -> Value {
            self.query.clone()
        }

        fn get_method(&self) -> http::Method {
            self.method.clone()
        }
    }

    impl RequestPayload for TestRequest {
        fn get_head(&self) -> &(dyn RequestHead + Send + Sync) {
            self
        }

        fn take_body(&self) -> Value {
            self.body.lock().unwrap().take()
        }
    }

    fn router() -> GraphQLRouter {
        let resolvers: Vec<Arc<dyn SubsystemGraphQLResolver + Send + Sync>> =
            vec![Arc::new(StubResolver(sports_subsystem()))];
        let schema = Arc::new(Schema::new_from_resolvers(&resolvers, true));
        let system_resolver = GraphQLSystemResolver::new(resolvers, schema, 10, 15);

        GraphQLRouter::new(Arc::new(system_resolver), Arc::new(MapEnvironment::new()))
    }

    async fn send(request: TestRequest) -> (StatusCode, Value) {
        let response = router().route(&request).await.unwrap();
        assert_eq!(
            response.headers.get("content-type").as_deref(),
            Some("application/json")
        );

        let bytes = response.body.into_bytes().await.unwrap();
        (response.status_code, serde_json::from_slice(&bytes).unwrap())
    }

    #[test(tokio::test)]
    async fn post_query() {
        assert_eq!(
            send(TestRequest::post(json!({ "query": "{ hello }" }))).await,
            (StatusCode::OK, json!({ "data": { "hello": "Hello world!" } }))
        );
    }

    #[test(tokio::test)]
    async fn get_query() {
        assert_eq!(
            send(TestRequest::get(json!({ "query": "{ greeting: hello }" }))).await,
            (StatusCode::OK, json!({ "data": { "greeting": "Hello world!" } }))
        );
    }

    #[test(tokio::test)]
    async fn field_errors_null_the_field() {
        let (status, body) =
            send(TestRequest::post(json!({ "query": "{ hello teams { name } }" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": { "hello": "Hello world!", "teams": null },
                "errors": [{
                    "message": "connection refused",
                    "locations": [{ "line": 1, "column": 9 }],
                    "path": ["teams"]
                }]
            })
        );
    }

    #[test(tokio::test)]
    async fn mutation_requires_post() {
        let query = r#"mutation { player(first_name: "A", last_name: "B", team_id: 1) { id } }"#;

        assert_eq!(
            send(TestRequest::get(json!({ "query": query }))).await,
            (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "errors": [{ "message": "Can only perform a mutation operation from a POST request." }] })
            )
        );

        assert_eq!(
            send(TestRequest::post(json!({ "query": query }))).await,
            (StatusCode::OK, json!({ "data": { "player": { "id": "1" } } }))
        );
    }

    #[test(tokio::test)]
    async fn validation_errors() {
        assert_eq!(
            send(TestRequest::post(json!({ "query": "{ stadiums }" }))).await,
            (
                StatusCode::BAD_REQUEST,
                json!({
                    "errors": [{
                        "message": "Field 'stadiums' is not valid for type 'Query'",
                        "locations": [{ "line": 1, "column": 3 }]
                    }]
                })
            )
        );
    }

    #[test(tokio::test)]
    async fn malformed_requests() {
        let (status, body) = send(TestRequest::post(json!({ "variables": {} }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": [{ "message": "Must provide query string." }] }));

        let (status, _) = send(TestRequest::post(Value::Null)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test(tokio::test)]
    async fn other_paths_are_ignored() {
        let mut request = TestRequest::post(json!({ "query": "{ hello }" }));
        request.path = "/graphql".to_string();

        assert!(router().route(&request).await.is_none());
    }
}
