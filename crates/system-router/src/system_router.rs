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
    env_const::{
        DEFAULT_MAX_INTROSPECTION_DEPTH, allow_mutations, check_connection_on_startup,
        get_max_selection_depth, is_introspection_enabled,
    },
    http::{RequestPayload, ResponsePayload},
    router::{CompositeRouter, Router},
};
use core_resolver::{
    introspection::definition::schema::Schema, plugin::SubsystemGraphQLResolver,
    system_resolver::GraphQLSystemResolver,
};
use graphql_router::GraphQLRouter;
use introspection_resolver::IntrospectionResolver;
use league_env::Environment;
use league_model::sports::sports_subsystem;
use league_resolver::LeagueSubsystemResolver;
use league_sql::{DatabaseExecutor, DatabasePool, SqlExecutor};
use playground_router::PlaygroundRouter;
use tracing::{debug, info};

use crate::SystemLoadingError;

/// Connect to the database configured in `env` and build the router serving the league API.
pub async fn create_system_router(
    env: Arc<dyn Environment>,
) -> Result<SystemRouter, SystemLoadingError> {
    let database_pool = DatabasePool::from_env(env.as_ref())?;

    if check_connection_on_startup(env.as_ref())? {
        database_pool.check_connection().await?;
        info!("Database connection verified");
    }

    create_system_router_with_executor(Arc::new(DatabaseExecutor { database_pool }), env)
}

pub fn create_system_router_with_executor(
    executor: Arc<dyn SqlExecutor>,
    env: Arc<dyn Environment>,
) -> Result<SystemRouter, SystemLoadingError> {
    let league_resolver: Arc<dyn SubsystemGraphQLResolver + Send + Sync> =
        Arc::new(LeagueSubsystemResolver::new(sports_subsystem(), executor));

    let mut graphql_resolvers = vec![league_resolver];

    let schema = Arc::new(Schema::new_from_resolvers(
        &graphql_resolvers,
        allow_mutations(env.as_ref())?,
    ));

    let introspection_enabled = is_introspection_enabled(env.as_ref())?;

    if introspection_enabled {
        graphql_resolvers.push(Arc::new(IntrospectionResolver::new(schema.clone())));
    }

    let max_selection_depth = get_max_selection_depth(env.as_ref())?;
    if max_selection_depth == 0 {
        return Err(SystemLoadingError::Config(
            "Maximum selection depth must be at least 1".to_string(),
        ));
    }

    let system_resolver = GraphQLSystemResolver::new(
        graphql_resolvers,
        schema,
        max_selection_depth,
        DEFAULT_MAX_INTROSPECTION_DEPTH,
    );

    let mut routers: Vec<Box<dyn Router + Send + Sync>> = vec![];

    // The explorer claims `GET <graphql path>` without a `query`, so it goes first
    if introspection_enabled {
        routers.push(Box::new(PlaygroundRouter::new(env.clone())));
    }
    routers.push(Box::new(GraphQLRouter::new(
        Arc::new(system_resolver),
        env.clone(),
    )));

    debug!(introspection_enabled, max_selection_depth, "System router created");

    Ok(SystemRouter {
        underlying: CompositeRouter::new(routers),
    })
}

pub struct SystemRouter {
    underlying: CompositeRouter,
}

#[async_trait]
impl Router for SystemRouter {
    async fn route(
        &self,
        request: &(dyn RequestPayload + Send + Sync),
    ) -> Option<ResponsePayload> {
        self.underlying.route(request).await
    }
}
