// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for ssm-loader using clap derive.
//!
//! # Command Line
//!
//! ```text
//! ssm-loader [global options] [-O] <command> [args...]
//!
//! -O            print NAME=VALUE lines, run nothing
//! <command>     first free argument, everything after it is passed through
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use clap::Parser;

/// SSM Parameter Store environment loader
///
/// Loads parameters from AWS Systems Manager Parameter Store into the
/// environment of a command.
#[derive(Debug, Parser)]
#[command(
    name = "ssm-loader",
    author,
    version,
    about = "Run a command with its environment loaded from SSM Parameter Store",
    long_about = "ssm-loader Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches the parameters under /{env}/ and /{env}/{app}/ and runs\n\
                  <command> with them added to its environment. Variables already\n\
                  set in the environment are never overridden, and shared\n\
                  parameters take precedence over application ones. Values may\n\
                  reference other variables as %%NAME%%.",
    after_help = "ENVIRONMENT:\n\n\
                  APP_NAME       application name, selects /{env}/{app}/\n\
                  APP_ENV        environment name, selects /{env}/\n\
                  WORKPATH_ENV   used when APP_ENV is unset\n\n\
                  AWS credentials and region are read the usual way (AWS_PROFILE,\n\
                  AWS_REGION, ~/.aws/config, ...). Loader settings can be set in\n\
                  ssm-loader.toml or as SSM_LOADER__<SECTION>__<KEY>."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Print the resolved environment as NAME=VALUE lines instead of running a command.
    #[arg(short = 'O', long = "output")]
    pub output: bool,

    /// Command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
