// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::ops::Deref;

/// A connection checked out of a [`DatabasePool`](super::database_pool::DatabasePool). Returned to
/// the pool when dropped.
pub struct DatabaseClient(deadpool_postgres::Client);

impl DatabaseClient {
    pub(crate) fn new(client: deadpool_postgres::Client) -> Self {
        Self(client)
    }
}

impl Deref for DatabaseClient {
    type Target = tokio_postgres::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
