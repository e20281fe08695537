// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use actix_web::{HttpRequest, http::header::HeaderMap};
use common::http::RequestHead;

pub struct ActixRequestHead {
    // HttpRequest holds an Rc, so it is neither Send nor Sync
    headers: HeaderMap,
    method: actix_web::http::Method,
    path: String,
    query: serde_json::Value,
}

impl ActixRequestHead {
    pub fn from_request(req: &HttpRequest, query: serde_json::Value) -> ActixRequestHead {
        ActixRequestHead {
            headers: req.headers().clone(),
            method: req.method().clone(),
            path: req.path().to_string(),
            query,
        }
    }
}

impl RequestHead for ActixRequestHead {
    fn get_headers(&self, key: &str) -> Vec<String> {
        self.headers
            .get_all(key.to_lowercase())
            .filter_map(|h| h.to_str().ok())
            .map(|h| h.to_string())
            .collect()
    }

    fn get_method(&self) -> http::Method {
        to_http_method(&self.method)
    }

    fn get_path(&self) -> String {
        self.path.clone()
    }

    fn get_query(&self) -> serde_json::Value {
        self.query.clone()
    }
}

// Actix uses http-0.2 while the rest of the system uses http-1.x
fn to_http_method(method: &actix_web::http::Method) -> http::Method {
    match *method {
        actix_web::http::Method::CONNECT => http::Method::CONNECT,
        actix_web::http::Method::GET => http::Method::GET,
        actix_web::http::Method::HEAD => http::Method::HEAD,
        actix_web::http::Method::OPTIONS => http::Method::OPTIONS,
        actix_web::http::Method::POST => http::Method::POST,
        actix_web::http::Method::PUT => http::Method::PUT,
        actix_web::http::Method::DELETE => http::Method::DELETE,
        actix_web::http::Method::PATCH => http::Method::PATCH,
        actix_web::http::Method::TRACE => http::Method::TRACE,
        _ => http::Method::from_bytes(method.as_str().as_bytes()).unwrap_or_else(|_| {
            tracing::warn!("Unsupported method: {}", method);
            http::Method::OPTIONS
        }),
    }
}
