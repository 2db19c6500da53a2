// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::Cli;
use crate::config::Config;
use crate::logging::LogLevel;
use clap::Parser;
use clap::error::ErrorKind;

#[test]
fn test_parse_command_passthrough() {
    let cli = Cli::try_parse_from(["ssm-loader", "node", "server.js", "--port", "8080", "-v"])
        .unwrap();

    assert!(!cli.output);
    assert_eq!(cli.command, ["node", "server.js", "--port", "8080", "-v"]);
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "ssm-loader",
        "-l",
        "4",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--log-file",
        "loader.log",
        "env",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.configs.len(), 2);
    assert_eq!(cli.command, ["env"]);
}

#[test]
fn test_options_after_command_belong_to_command() {
    let cli = Cli::try_parse_from(["ssm-loader", "env", "-O", "-l", "9"]).unwrap();

    assert!(!cli.output);
    assert_eq!(cli.global.log_level, None);
    assert_eq!(cli.command, ["env", "-O", "-l", "9"]);
}

#[test]
fn test_parse_output_without_command() {
    let cli = Cli::try_parse_from(["ssm-loader", "-O"]).unwrap();

    assert!(cli.output);
    assert!(cli.command.is_empty());
}

#[test]
fn test_help_and_version_are_not_failures() {
    let help = Cli::try_parse_from(["ssm-loader", "-h"]).unwrap_err();
    assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    assert_eq!(help.exit_code(), 0);

    let version = Cli::try_parse_from(["ssm-loader", "--version"]).unwrap_err();
    assert_eq!(version.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_log_level_range() {
    let err = Cli::try_parse_from(["ssm-loader", "-l", "7", "env"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_global_options_override_config() {
    let cli = Cli::try_parse_from(["ssm-loader", "-l", "0", "--log-file", "x.log", "-O"]).unwrap();

    let config: Config = cli
        .global
        .apply(Config::builder().add_toml_str("[log]\nlevel = 5\n"))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.log.level, LogLevel::SILENT);
    assert_eq!(config.log.file.as_deref(), Some(std::path::Path::new("x.log")));
}

#[test]
fn test_cli_definition() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
