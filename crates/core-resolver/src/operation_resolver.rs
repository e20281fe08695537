// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;

use crate::FieldResolver;
use crate::QueryResponse;
use crate::system_resolver::{GraphQLSystemResolver, SystemResolutionError};
use crate::validation::field::ValidatedField;
use crate::validation::operation::ValidatedOperation;

/// Resolver for the root operation.
///
/// The operation may be a query or a mutation and may be for data or for introspection.
#[async_trait]
impl FieldResolver<QueryResponse, SystemResolutionError, GraphQLSystemResolver>
    for ValidatedOperation
{
    async fn resolve_field<'e>(
        &'e self,
        field: &ValidatedField,
        system_resolver: &'e GraphQLSystemResolver,
    ) -> Result<QueryResponse, SystemResolutionError> {
        system_resolver.resolve_root_field(self.typ, field).await
    }
}
