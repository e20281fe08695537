// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Answers `__schema`, `__type(name:)` and the root `__typename` from the [Schema] built for
//! validation.
//!
//! [Schema]: core_resolver::introspection::definition::schema::Schema

pub use crate::introspection_resolver::IntrospectionResolver;

mod enum_value_resolver;
mod field_definition_resolver;
mod field_resolver;
mod input_value_resolver;
mod introspection_resolver;
mod resolver_support;
mod root_resolver;
mod schema_resolver;
mod type_resolver;
