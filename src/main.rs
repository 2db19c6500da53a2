// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Invocation::new (usage)
//!   --> SsmStore --> Invocation::run --> exit code
//! ```

use std::process::ExitCode;

use ssm_loader::cli::{self, Cli};
use ssm_loader::cmd::run::Invocation;
use ssm_loader::config::Config;
use ssm_loader::config::loader::SettingsFile;
use ssm_loader::config::types::LogSettings;
use ssm_loader::core::env::current_env;
use ssm_loader::error::LoaderError;
use ssm_loader::logging::{LogConfig, init_logging};
use ssm_loader::store::ssm::SsmStore;

use mimalloc::MiMalloc;
use tracing::debug;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Settings file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "ssm-loader.toml";

/// Prefix of `SSM_LOADER__<SECTION>__<KEY>` overrides.
const ENV_PREFIX: &str = "SSM_LOADER";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, files) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config.log)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    for file in &files {
        debug!(%file, "settings file");
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_child_exit(&e) {
                debug!(error = %e, "child failed");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// The child ran and reported its own failure; only its status is passed on.
fn is_child_exit(e: &LoaderError) -> bool {
    matches!(e, LoaderError::Process(err) if err.is_child_exit())
}

async fn run(cli: &Cli, config: &Config) -> Result<(), LoaderError> {
    let invocation = Invocation::new(cli.output, &cli.command)?;

    let store = SsmStore::from_env(&config.store).await;
    let os_env = current_env();

    invocation
        .run(&store, config, os_env, &mut std::io::stdout())
        .await
}

fn load_config(cli: &Cli) -> ssm_loader::error::Result<(Config, Vec<SettingsFile>)> {
    let loader = Config::builder().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    let loader = cli.global.apply(loader)?.with_env_prefix(ENV_PREFIX);
    let files = loader.loaded_files().to_vec();
    Ok((loader.build()?, files))
}

fn build_log_config(settings: &LogSettings) -> LogConfig {
    LogConfig::builder()
        .with_console_level(settings.level)
        .with_file_level(settings.file_level)
        .maybe_with_log_file(settings.file.as_ref().map(|p| p.display().to_string()))
        .build()
}
