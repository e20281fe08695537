// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use maybe_owned::MaybeOwned;

use super::{SQLBuilder, SQLParam};

/// Implemented by every constituent of an SQL statement (column, table, predicate, select, etc.)
/// so that a statement can be rendered hierarchically into a single [SQLBuilder].
pub trait ExpressionBuilder {
    fn build(&self, builder: &mut SQLBuilder);

    /// Render into a fresh builder and return the SQL text along with its parameters.
    fn to_sql(&self) -> (String, Vec<Arc<dyn SQLParam>>)
    where
        Self: Sized,
    {
        let mut builder = SQLBuilder::new();
        self.build(&mut builder);
        builder.into_sql()
    }
}

impl<T> ExpressionBuilder for Box<T>
where
    T: ExpressionBuilder,
{
    fn build(&self, builder: &mut SQLBuilder) {
        self.as_ref().build(builder)
    }
}

impl<T> ExpressionBuilder for MaybeOwned<'_, T>
where
    T: ExpressionBuilder,
{
    fn build(&self, builder: &mut SQLBuilder) {
        self.as_ref().build(builder)
    }
}

impl<T> ExpressionBuilder for &T
where
    T: ExpressionBuilder,
{
    fn build(&self, builder: &mut SQLBuilder) {
        (**self).build(builder)
    }
}
