// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Transport-independent view of HTTP requests and responses.
//!
//! Routers only see these types, so the same routing code serves the actix server and the tests.

use http::StatusCode;
use serde_json::Value;

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

pub trait RequestPayload {
    fn get_head(&self) -> &(dyn RequestHead + Send + Sync);

    /// Take the JSON body, leaving `Value::Null` in its place.
    fn take_body(&self) -> Value;
}

type PinnedStream<E> = Pin<Box<dyn Stream<Item = Result<Bytes, E>>>>;

#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn from_vec(vec: Vec<(String, String)>) -> Self {
        Self {
            inner: vec
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        self.inner
            .iter()
            .find(|(k, _)| k == &key)
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.inner.push((key.to_lowercase(), value));
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

pub struct ResponsePayload {
    pub body: ResponseBody,
    pub headers: Headers,
    pub status_code: StatusCode,
}

pub enum ResponseBody {
    Stream(PinnedStream<std::io::Error>),
    Bytes(Vec<u8>),
    None,
}

impl ResponseBody {
    /// Collect the body into bytes (mostly useful for tests).
    pub async fn into_bytes(self) -> Result<Vec<u8>, std::io::Error> {
        use futures::StreamExt;

        match self {
            ResponseBody::Stream(mut stream) => {
                let mut bytes = Vec::new();
                while let Some(chunk) = stream.next().await {
                    bytes.extend_from_slice(&chunk?);
                }
                Ok(bytes)
            }
            ResponseBody::Bytes(bytes) => Ok(bytes),
            ResponseBody::None => Ok(vec![]),
        }
    }
}

/// Represents a HTTP request from which information can be extracted
pub trait RequestHead {
    // return all header values that have the following key
    fn get_headers(&self, key: &str) -> Vec<String>;

    // return the first header
    fn get_header(&self, key: &str) -> Option<String> {
        self.get_headers(&key.to_lowercase()).first().cloned()
    }

    fn get_path(&self) -> String;

    /// Query string parameters as a JSON object of strings
    fn get_query(&self) -> Value;

    fn get_method(&self) -> http::Method;
}

pub fn strip_leading_slash(path: &str) -> String {
    strip_leading(path, "/")
}

pub fn strip_leading(path: &str, leading: &str) -> String {
    path.strip_prefix(leading).unwrap_or(path).to_string()
}
