// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! The server code is instrumented with Rust's `tracing` framework.
//!
//! Calling [init] installs a global subscriber that prints to the console, filtered by the
//! `LEAGUE_LOG` environment variable (same syntax as `RUST_LOG`, defaulting to `warn`). For example,
//! `LEAGUE_LOG=league_sql=debug` prints every executed SQL statement along with its parameters.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

use crate::env_const::LEAGUE_LOG;

pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LEAGUE_LOG)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
