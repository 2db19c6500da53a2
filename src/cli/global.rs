// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional settings files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --log-file FILE   ← Log file path
//!
//! Precedence: CLI flags > SSM_LOADER__* env > --config > ssm-loader.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML settings file(s).
    /// Can be specified multiple times, later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Applies the options on top of `loader`: `--config` files as
    /// required sources, log flags as final overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn apply(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }

        if let Some(level) = self.log_level {
            loader = loader.set("log.level", i64::from(level))?;
        }

        if let Some(ref path) = self.log_file {
            loader = loader.set("log.file", path.to_string_lossy().into_owned())?;
        }

        Ok(loader)
    }
}
