// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment namespace management.
//!
//! # Architecture
//!
//! ```text
//! current_env() --> OsEnv { vars: Namespace (seed), opaque }
//!                     merge(batch) ... first write wins
//!                     interpolate() --> new Namespace
//!                   opaque ----------------------------> child env, as is
//! ```
//!
//! - **Case-sensitive** keys
//! - **Owned**: each stage takes the namespace by value or reference and
//!   hands back a new one, nothing is shared
//! - **UTF-8 internal**: process variables that are not UTF-8 bypass the
//!   namespace and reach the child unchanged

pub mod interpolate;
pub mod namespace;


use std::ffi::OsString;

use tracing::debug;

use namespace::Namespace;

/// The process environment, split by encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsEnv {
    /// UTF-8 variables. Names of the opaque ones are reserved here.
    pub vars: Namespace,
    /// Variables whose name or value is not UTF-8.
    pub opaque: Vec<(OsString, OsString)>,
}

impl OsEnv {
    /// Splits raw `(name, value)` pairs, first occurrence wins.
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    env.vars.insert_if_absent(key, value);
                }
                (key, value) => {
                    if let Ok(name) = &key
                        && !env.vars.reserve(name.as_str())
                    {
                        continue;
                    }
                    let key = key.map_or_else(|raw| raw, OsString::from);
                    let value = value.map_or_else(|raw| raw, OsString::from);
                    debug!(name = ?key, "passing non UTF-8 variable through");
                    env.opaque.push((key, value));
                }
            }
        }
        env
    }
}

impl From<Namespace> for OsEnv {
    fn from(vars: Namespace) -> Self {
        Self {
            vars,
            opaque: Vec::new(),
        }
    }
}

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> OsEnv {
    OsEnv::from_vars_os(std::env::vars_os())
}
