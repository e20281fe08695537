// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::http::{Headers, RequestPayload, ResponseBody, ResponsePayload};
use async_trait::async_trait;
use http::StatusCode;

/// Handles the requests it recognizes. Returning `None` lets the next router try.
#[async_trait]
pub trait Router: Sync {
    async fn route(&self, request: &(dyn RequestPayload + Send + Sync))
    -> Option<ResponsePayload>;
}

/// Tries each router in order, answering with 404 when none of them claims the request.
pub struct CompositeRouter {
    routers: Vec<Box<dyn Router + Send + Sync>>,
}

impl CompositeRouter {
    pub fn new(routers: Vec<Box<dyn Router + Send + Sync>>) -> Self {
        Self { routers }
    }
}

#[async_trait]
impl Router for CompositeRouter {
    async fn route(
        &self,
        request: &(dyn RequestPayload + Send + Sync),
    ) -> Option<ResponsePayload> {
        for router in self.routers.iter() {
            if let Some(response) = router.route(request).await {
                return Some(response);
            }
        }

        Some(ResponsePayload {
            body: ResponseBody::None,
            headers: Headers::new(),
            status_code: StatusCode::NOT_FOUND,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::http::RequestHead;

    use super::*;

    struct PathRequest(String);

    impl RequestHead for PathRequest {
        fn get_headers(&self, _key: &str) -> Vec<String> {
            vec![]
        }

        fn get_path(&self) -> String {
            self.0.clone()
        }

        fn get_query(&self) -> Value {
            Value::Null
        }

        fn get_method(&self) -> http::Method {
            http::Method::GET
        }
    }

    impl RequestPayload for PathRequest {
        fn get_head(&self) -> &(dyn RequestHead + Send + Sync) {
            self
        }

        fn take_body(&self) -> Value {
            Value::Null
        }
    }

    struct FixedPathRouter(&'static str, StatusCode);

    #[async_trait]
    impl Router for FixedPathRouter {
        async fn route(
            &self,
            request: &(dyn RequestPayload + Send + Sync),
        ) -> Option<ResponsePayload> {
            (request.get_head().get_path() == self.0).then(|| ResponsePayload {
                body: ResponseBody::None,
                headers: Headers::new(),
                status_code: self.1,
            })
        }
    }

    #[tokio::test]
    async fn first_matching_router_wins() {
        let router = CompositeRouter::new(vec![
            Box::new(FixedPathRouter("/api", StatusCode::OK)),
            Box::new(FixedPathRouter("/api", StatusCode::ACCEPTED)),
        ]);

        let response = router.route(&PathRequest("/api".into())).await.unwrap();
        assert_eq!(response.status_code, StatusCode::OK);

        let response = router.route(&PathRequest("/missing".into())).await.unwrap();
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
    }
}
