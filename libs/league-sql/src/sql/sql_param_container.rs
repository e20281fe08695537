// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use tokio_postgres::types::{ToSql, Type, to_sql_checked};

use super::SQLParam;

/// Shareable wrapper around a bound value. `Arc` is not `#[fundamental]`, so implementing `ToSql`
/// needs a newtype.
#[derive(Clone)]
pub struct SQLParamContainer(Arc<dyn SQLParam>);

impl SQLParamContainer {
    pub fn new<T: SQLParam + 'static>(param: T) -> Self {
        Self(Arc::new(param))
    }

    pub fn param(&self) -> Arc<dyn SQLParam> {
        self.0.clone()
    }
}

impl ToSql for SQLParamContainer {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<tokio_postgres::types::IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.0.as_ref().to_sql_checked(ty, out)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl PartialEq for SQLParamContainer {
    fn eq(&self, other: &Self) -> bool {
        SQLParam::eq(self.0.as_ref(), other.0.as_ref())
    }
}

impl Debug for SQLParamContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
