// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Loader settings.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ssm-loader.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. SSM_LOADER__* env vars
//! 5. CLI flags (log level / log file)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SSM_LOADER__STORE__PAGE_SIZE=5        → store.page_size = 5
//! SSM_LOADER__SCOPES__ENV_VAR=STAGE     → scopes.env_var = "STAGE"
//! SSM_LOADER__LOG__LEVEL=4              → log.level = 4
//! ```
//!
//! These settings only drive the loader itself. The values that end up in
//! the child's environment come from the process environment and the
//! parameter store.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{LogSettings, ScopesConfig, StoreConfig};

/// Largest page `GetParametersByPath` accepts.
pub const MAX_PAGE_SIZE: i32 = 10;

/// Complete loader configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Names of the variables that select the parameter scopes.
    pub scopes: ScopesConfig,
    /// Parameter store client and pagination.
    pub store: StoreConfig,
    /// Log output.
    pub log: LogSettings,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ssm_loader::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("ssm-loader.toml")
    ///     .with_env_prefix("SSM_LOADER")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `store.page_size` is outside
    /// `1..=10` or an optional string setting is present but empty.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.store.page_size) {
            return Err(ConfigError::InvalidValue {
                section: "store".to_string(),
                key: "page_size".to_string(),
                message: format!(
                    "must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.store.page_size
                ),
            });
        }

        for (key, value) in [
            ("app_name_var", &self.scopes.app_name_var),
            ("env_var", &self.scopes.env_var),
        ] {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "scopes".to_string(),
                    key: key.to_string(),
                    message: "variable name must not be empty".to_string(),
                });
            }
        }

        for (key, value) in [
            ("region", &self.store.region),
            ("endpoint", &self.store.endpoint),
        ] {
            if value.as_deref().is_some_and(str::is_empty) {
                return Err(ConfigError::InvalidValue {
                    section: "store".to_string(),
                    key: key.to_string(),
                    message: "must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }
}
