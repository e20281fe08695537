// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolves the league's root fields against PostgreSQL.
//!
//! Each entity query or mutation becomes a single SQL statement: the selection set is turned
//! into a [`selection_plan::SelectionPlan`] (one `LEFT JOIN` per nested relation) and the
//! resulting flat rows are folded back into the requested shape by [`hydrator`].

mod hydrator;
mod league_execution_error;
mod league_mutation;
mod league_query;
mod selection_plan;

pub mod plugin;

#[cfg(test)]
mod test_utils;

pub use league_execution_error::LeagueExecutionError;
pub use plugin::LeagueSubsystemResolver;
