// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use actix_web::{App, HttpServer, middleware, web};

use server_actix::configure_router;
use system_router::SystemLoadingError;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use std::net::SocketAddr;
use std::time;
use std::{io::ErrorKind, sync::Arc};

use common::env_const::{
    get_graphql_http_path, get_server_host, get_server_port, is_introspection_enabled,
};

use league_env::{Environment, SystemEnvironment};

#[derive(Error)]
enum ServerError {
    #[error("Port {0} is already in use. Check if there is another process running at that port.")]
    PortInUse(u16),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    EnvError(#[from] league_env::EnvError),
    #[error("{0}")]
    SystemLoading(#[from] SystemLoadingError),
}

// Delegates to `Display` so that exiting with an error prints a readable message
impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    let start_time = time::SystemTime::now();

    common::logging_tracing::init();

    let env: Arc<dyn Environment> = Arc::new(SystemEnvironment);

    let system_router = web::Data::new(system_router::create_system_router(env.clone()).await?);

    let server_host = get_server_host(env.as_ref());
    let server_port = get_server_port(env.as_ref())?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .configure(configure_router(system_router.clone()))
    });

    match server.bind((server_host.as_str(), server_port)) {
        Ok(server) => {
            let pretty_addr = pretty_addr(&server.addrs());
            let graphql_http_path = get_graphql_http_path(env.as_ref());

            println!(
                "Started server on {} in {:.2} ms",
                pretty_addr,
                start_time
                    .elapsed()
                    .map(|elapsed| elapsed.as_micros() as f64 / 1000.0)
                    .unwrap_or_default()
            );
            println!("- GraphQL endpoint hosted at:");
            println!("\thttp://{pretty_addr}{graphql_http_path}");

            if is_introspection_enabled(env.as_ref())? {
                println!("- GraphiQL hosted at:");
                println!("\thttp://{pretty_addr}{graphql_http_path}");
            }

            Ok(server.run().await?)
        }
        Err(e) => Err(if e.kind() == ErrorKind::AddrInUse {
            ServerError::PortInUse(server_port)
        } else {
            ServerError::Io(e)
        }),
    }
}

fn pretty_addr(addrs: &[SocketAddr]) -> String {
    let loopback_addr = addrs.iter().find(|addr| addr.ip().is_loopback());

    match loopback_addr {
        Some(addr) => format!("localhost:{}", addr.port()),
        None => match addrs {
            [addr] => format!("{addr}"),
            _ => format!("{addrs:?}"),
        },
    }
}
