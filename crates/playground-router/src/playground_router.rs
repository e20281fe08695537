// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use common::{
    env_const::get_graphql_http_path,
    http::{
        Headers, RequestHead, RequestPayload, ResponseBody, ResponsePayload, strip_leading,
        strip_leading_slash,
    },
    router::Router,
};
use http::StatusCode;
use league_env::Environment;

use crate::explorer::{self, INDEX_PATH};

/// Serves the GraphiQL explorer: `GET <graphql path>` without a `query` parameter returns the
/// index page and `GET <graphql path>/<asset>` its assets.
pub struct PlaygroundRouter {
    graphql_http_path: String,
}

impl PlaygroundRouter {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self {
            graphql_http_path: get_graphql_http_path(env.as_ref()),
        }
    }

    /// The asset to serve, if this request is for the explorer
    fn asset_path(&self, request_head: &(dyn RequestHead + Send + Sync)) -> Option<String> {
        if request_head.get_method() != http::Method::GET {
            return None;
        }

        let path = request_head.get_path();

        if path == self.graphql_http_path {
            let has_query = request_head
                .get_query()
                .get("query")
                .is_some_and(|query| !query.is_null());

            (!has_query).then(|| INDEX_PATH.to_string())
        } else {
            let rest = strip_leading(&path, &self.graphql_http_path);

            // Only `<graphql path>/...`, not `<graphql path>suffix`
            (rest != path && rest.starts_with('/')).then(|| strip_leading_slash(&rest))
        }
    }
}

#[async_trait]
impl Router for PlaygroundRouter {
    async fn route(
        &self,
        request: &(dyn RequestPayload + Send + Sync),
    ) -> Option<ResponsePayload> {
        let asset_path = self.asset_path(request.get_head())?;

        let content_type = mime_guess::from_path(&asset_path).first_or_octet_stream();

        // The index page isn't cached, since the endpoint path is substituted into it
        let cache_control = if asset_path == INDEX_PATH {
            "no-cache".to_string()
        } else {
            format!("public, max-age={}", 60 * 60 * 24 * 365)
        };

        match explorer::get_asset_bytes(&asset_path, &self.graphql_http_path) {
            Some(asset) => Some(ResponsePayload {
                body: ResponseBody::Bytes(asset),
                headers: Headers::from_vec(vec![
                    (http::header::CACHE_CONTROL.to_string(), cache_control),
                    (
                        http::header::CONTENT_TYPE.to_string(),
                        content_type.to_string(),
                    ),
                ]),
                status_code: StatusCode::OK,
            }),
            None => {
                tracing::debug!("No explorer asset at '{asset_path}'");
                Some(ResponsePayload {
                    body: ResponseBody::None,
                    headers: Headers::new(),
                    status_code: StatusCode::NOT_FOUND,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use league_env::MapEnvironment;
    use serde_json::{Value, json};

    use super::*;

    struct TestRequest {
        method: http::Method,
        path: &'static str,
        query: Value,
    }

    impl RequestHead for TestRequest {
        fn get_headers(&self, _key: &str) -> Vec<String> {
            vec![]
        }

        fn get_path(&self) -> String {
            self.path.to_string()
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
            Value::Null
        }
    }

    fn get(path: &'static str, query: Value) -> TestRequest {
        TestRequest {
            method: http::Method::GET,
            path,
            query,
        }
    }

    fn router() -> PlaygroundRouter {
        PlaygroundRouter::new(Arc::new(MapEnvironment::new()))
    }

    #[tokio::test]
    async fn index_page() {
        let response = router().route(&get("/api", json!({}))).await.unwrap();

        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(response.headers.get("content-type").as_deref(), Some("text/html"));
        assert_eq!(response.headers.get("cache-control").as_deref(), Some("no-cache"));
    }

    #[tokio::test]
    async fn assets() {
        let response = router()
            .route(&get("/api/explorer.js", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(
            response.headers.get("cache-control").as_deref(),
            Some("public, max-age=31536000")
        );

        let missing = router()
            .route(&get("/api/missing.css", json!({})))
            .await
            .unwrap();
        assert_eq!(missing.status_code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn leaves_operations_to_graphql() {
        let router = router();

        assert!(router.route(&get("/api", json!({ "query": "{ hello }" }))).await.is_none());
        assert!(router.route(&get("/apix", json!({}))).await.is_none());

        let post = TestRequest {
            method: http::Method::POST,
            path: "/api",
            query: json!({}),
        };
        assert!(router.route(&post).await.is_none());
    }
}
