// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use league_env::{EnvError, Environment, parse_env_value};

pub const LEAGUE_LOG: &str = "LEAGUE_LOG";

pub const LEAGUE_SERVER_HOST: &str = "LEAGUE_SERVER_HOST";
pub const LEAGUE_SERVER_PORT: &str = "LEAGUE_SERVER_PORT";

pub const LEAGUE_GRAPHQL_HTTP_PATH: &str = "LEAGUE_GRAPHQL_HTTP_PATH";
pub const LEAGUE_INTROSPECTION: &str = "LEAGUE_INTROSPECTION";
pub const LEAGUE_GRAPHQL_ALLOW_MUTATIONS: &str = "LEAGUE_GRAPHQL_ALLOW_MUTATIONS";
pub const LEAGUE_MAX_SELECTION_DEPTH: &str = "LEAGUE_MAX_SELECTION_DEPTH";

pub const LEAGUE_POSTGRES_URL: &str = "LEAGUE_POSTGRES_URL";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const LEAGUE_POSTGRES_USER: &str = "LEAGUE_POSTGRES_USER";
pub const LEAGUE_POSTGRES_PASSWORD: &str = "LEAGUE_POSTGRES_PASSWORD";
pub const LEAGUE_CONNECTION_POOL_SIZE: &str = "LEAGUE_CONNECTION_POOL_SIZE";
pub const LEAGUE_CHECK_CONNECTION_ON_STARTUP: &str = "LEAGUE_CHECK_CONNECTION_ON_STARTUP";

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 4000;
pub const DEFAULT_CONNECTION_POOL_SIZE: usize = 10;
pub const DEFAULT_MAX_SELECTION_DEPTH: usize = 10;
/// Introspection queries (such as the one GraphiQL issues) nest deeper than ordinary queries
pub const DEFAULT_MAX_INTROSPECTION_DEPTH: usize = 15;

pub fn get_graphql_http_path(env: &dyn Environment) -> String {
    env.get(LEAGUE_GRAPHQL_HTTP_PATH)
        .unwrap_or_else(|| "/api".to_string())
}

pub fn get_server_host(env: &dyn Environment) -> String {
    env.get_or_else(LEAGUE_SERVER_HOST, DEFAULT_SERVER_HOST)
}

pub fn get_server_port(env: &dyn Environment) -> Result<u16, EnvError> {
    parse_env_value(env, LEAGUE_SERVER_PORT, DEFAULT_SERVER_PORT)
}

pub fn is_introspection_enabled(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(LEAGUE_INTROSPECTION, true)
}

pub fn allow_mutations(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(LEAGUE_GRAPHQL_ALLOW_MUTATIONS, true)
}

pub fn check_connection_on_startup(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(LEAGUE_CHECK_CONNECTION_ON_STARTUP, true)
}

pub fn get_max_selection_depth(env: &dyn Environment) -> Result<usize, EnvError> {
    parse_env_value(env, LEAGUE_MAX_SELECTION_DEPTH, DEFAULT_MAX_SELECTION_DEPTH)
}

#[cfg(test)]
mod tests {
    use league_env::MapEnvironment;

    use super::*;

    #[test]
    fn defaults() {
        let env = MapEnvironment::new();

        assert_eq!(get_graphql_http_path(&env), "/api");
        assert_eq!(get_server_host(&env), "0.0.0.0");
        assert_eq!(get_server_port(&env).unwrap(), 4000);
        assert!(is_introspection_enabled(&env).unwrap());
        assert!(allow_mutations(&env).unwrap());
        assert_eq!(get_max_selection_depth(&env).unwrap(), 10);
    }

    #[test]
    fn overrides() {
        let env = MapEnvironment::from([
            (LEAGUE_GRAPHQL_HTTP_PATH, "/graphql"),
            (LEAGUE_SERVER_PORT, "9876"),
            (LEAGUE_INTROSPECTION, "false"),
        ]);

        assert_eq!(get_graphql_http_path(&env), "/graphql");
        assert_eq!(get_server_port(&env).unwrap(), 9876);
        assert!(!is_introspection_enabled(&env).unwrap());
    }
}
