// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use league_env::MapEnvironment;
use league_sql::{SqlExecutor, SqlRow, SqlStatement, database_error::DatabaseError};
use serde_json::{Value, json};
use server_actix::configure_router;
use system_router::create_system_router_with_executor;

struct CannedRows(Vec<SqlRow>);

#[async_trait]
impl SqlExecutor for CannedRows {
    async fn query(&self, _statement: SqlStatement) -> Result<Vec<SqlRow>, DatabaseError> {
        Ok(self.0.clone())
    }
}

macro_rules! app {
    ($rows:expr) => {{
        let system_router = create_system_router_with_executor(
            Arc::new(CannedRows($rows)),
            Arc::new(MapEnvironment::new()),
        )
        .unwrap();

        test::init_service(
            App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(configure_router(web::Data::new(system_router))),
        )
        .await
    }};
}

#[test_log::test(actix_web::test)]
async fn post_query() {
    let app = app!(vec![vec![json!(4), json!("Tigers")]]);

    let req = test::TestRequest::post()
        .uri("/api")
        .set_json(json!({ "query": "{ hello teams { id name } }" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "data": { "hello": "Hello world!", "teams": [{ "id": 4, "name": "Tigers" }] } })
    );
}

#[test_log::test(actix_web::test)]
async fn get_query_with_variables() {
    let app = app!(vec![vec![json!(7), json!("Ada")]]);

    let req = test::TestRequest::get()
        .uri("/api/?query=query%20P(%24id%3A%20Int!)%20%7B%20player(id%3A%20%24id)%20%7B%20id%20first_name%20%7D%20%7D&variables=%7B%22id%22%3A7%7D")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({ "data": { "player": { "id": "7", "first_name": "Ada" } } })
    );
}

#[test_log::test(actix_web::test)]
async fn explorer() {
    let app = app!(vec![]);

    let req = test::TestRequest::get().uri("/api").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("GraphiQL"));
}

#[test_log::test(actix_web::test)]
async fn mutation_over_get() {
    let app = app!(vec![]);

    let req = test::TestRequest::get()
        .uri("/api?query=mutation%20%7B%20player(first_name%3A%20%22A%22%2C%20last_name%3A%20%22B%22%2C%20team_id%3A%201)%20%7B%20id%20%7D%20%7D")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers().get("allow").unwrap(), "POST");
}

#[test_log::test(actix_web::test)]
async fn bad_requests() {
    let app = app!(vec![]);

    let req = test::TestRequest::post()
        .uri("/api")
        .set_json(json!({ "query": "{ unknown }" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[test_log::test(actix_web::test)]
async fn unknown_path() {
    let app = app!(vec![]);

    let req = test::TestRequest::get().uri("/graphql").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
