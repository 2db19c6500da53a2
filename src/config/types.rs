// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [scopes]  app_name_var, env_var, env_fallback_var
//! [store]   page_size, page_delay_ms, region?, endpoint?, timeout_ms?
//! [log]     level, file?, file_level
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;

/// Names of the environment variables that select the parameter scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopesConfig {
    /// Variable holding the application name (app scope).
    pub app_name_var: String,
    /// Variable holding the environment name (shared scope).
    pub env_var: String,
    /// Legacy variable consulted when `env_var` is unset or empty.
    /// An empty string disables the fallback.
    pub env_fallback_var: String,
}

impl Default for ScopesConfig {
    fn default() -> Self {
        Self {
            app_name_var: "APP_NAME".to_string(),
            env_var: "APP_ENV".to_string(),
            env_fallback_var: "WORKPATH_ENV".to_string(),
        }
    }
}

/// Parameter store client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Parameters requested per page (1-10).
    pub page_size: i32,
    /// Pause between two page requests, in milliseconds.
    pub page_delay_ms: u64,
    /// AWS region override; the SDK default chain applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint override (e.g. LocalStack).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Per-operation timeout, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_delay_ms: 100,
            region: None,
            endpoint: None,
            timeout_ms: None,
        }
    }
}

impl StoreConfig {
    /// Pause between two page requests.
    #[must_use]
    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Per-operation timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Log output settings; `--log-level` and `--log-file` take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Console (stderr) level, 0-6.
    pub level: LogLevel,
    /// Optional log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Level for the log file, 0-6.
    pub file_level: LogLevel,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::WARN,
            file: None,
            file_level: LogLevel::TRACE,
        }
    }
}
