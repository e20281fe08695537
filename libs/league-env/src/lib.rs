// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to configuration values supplied through the environment.
//!
//! Code that needs configuration takes a `&dyn Environment` so that tests can supply a
//! [`MapEnvironment`] instead of mutating the process environment.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Interpret the value of `key` as a boolean flag, falling back to `default_value` if unset.
    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }

    /// Parse the value of `key` (typically a port or a size), falling back to `default_value` if unset.
    fn get_parsed<T: FromStr>(&self, key: &str, default_value: T) -> Result<T, EnvError>
    where
        Self: Sized,
    {
        parse_env_value(self, key, default_value)
    }
}

/// Object-safe version of [`Environment::get_parsed`].
pub fn parse_env_value<T: FromStr>(
    env: &(impl Environment + ?Sized),
    key: &str,
    default_value: T,
) -> Result<T, EnvError> {
    match env.get(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| EnvError::InvalidValue {
                key: key.to_string(),
                value,
                expected: std::any::type_name::<T>(),
            }),
        None => Ok(default_value),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid value for {key}: {value}. Expected a value of type {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Env {0} must be provided")]
    Missing(&'static str),
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    fallback: Option<Arc<dyn Environment>>,
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|fb| fb.get(key)))
    }
}

impl From<HashMap<String, String>> for MapEnvironment {
    fn from(values: HashMap<String, String>) -> Self {
        Self {
            values,
            fallback: None,
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fallback: None,
        }
    }
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_fallback(fallback: Arc<dyn Environment>) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
