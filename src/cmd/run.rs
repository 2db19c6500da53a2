// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The load-and-exec invocation.
//!
//! ```text
//! os env ──> Scopes { env, app }
//!   |            |
//!   |            +── env set?  fetch /{env}/        (shared)
//!   |            +── app set?  fetch /{env}/{app}/  (app)
//!   v
//! seed ──> merge(shared) ──> merge(app) ──> interpolate
//!                                              |
//!                              -O: print NAME=VALUE, sorted
//!                              else: exec command with namespace
//!                                    plus the opaque OS variables
//! ```

use std::io::{ErrorKind, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::config::types::{ScopesConfig, StoreConfig};
use crate::core::env::interpolate::interpolate;
use crate::core::env::OsEnv;
use crate::core::env::namespace::Namespace;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{FetchError, LoaderError, LoaderResult, ScopeKind};
use crate::store::ParameterStore;
use crate::store::fetcher::Fetcher;

/// Environment and application names that select the parameter scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scopes {
    pub env: Option<String>,
    pub app: Option<String>,
}

impl Scopes {
    /// Reads the scope names from `vars`. Empty values count as unset.
    ///
    /// The environment name falls back to `env_fallback_var` when
    /// `env_var` is unset; an empty fallback name disables that.
    #[must_use]
    pub fn from_namespace(vars: &Namespace, config: &ScopesConfig) -> Self {
        let read = |name: &str| {
            if name.is_empty() {
                return None;
            }
            vars.get(name)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Self {
            env: read(&config.env_var).or_else(|| read(&config.env_fallback_var)),
            app: read(&config.app_name_var),
        }
    }

    /// `/{env}/`, when an environment name is set.
    #[must_use]
    pub fn shared_path(&self) -> Option<String> {
        self.env.as_deref().map(|env| format!("/{env}/"))
    }

    /// `/{env}/{app}/`, when an application name is set.
    ///
    /// Without an environment name this is `//{app}/`.
    #[must_use]
    pub fn app_path(&self) -> Option<String> {
        let env = self.env.as_deref().unwrap_or_default();
        self.app.as_deref().map(|app| format!("/{env}/{app}/"))
    }

    /// Scopes to fetch, in precedence order.
    #[must_use]
    pub fn paths(&self) -> Vec<(ScopeKind, String)> {
        [
            (ScopeKind::Shared, self.shared_path()),
            (ScopeKind::App, self.app_path()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|path| (kind, path)))
        .collect()
    }
}

/// Seeds a namespace with `os_env`, merges every configured scope and
/// resolves `%%NAME%%` tokens.
///
/// # Errors
///
/// Returns [`LoaderError::Fetch`] naming the first scope that failed.
pub async fn resolve_namespace<S>(
    store: &S,
    config: &StoreConfig,
    os_env: Namespace,
    scopes: &Scopes,
) -> LoaderResult<Namespace>
where
    S: ParameterStore + ?Sized,
{
    let fetcher = Fetcher::from_config(store, config);
    let mut namespace = os_env;

    for (scope, path) in scopes.paths() {
        let batch = match fetcher.fetch_all(&path).await {
            Ok(batch) => batch,
            Err(source) => return Err(FetchError { scope, path, source }.into()),
        };

        let stats = namespace.merge(&batch);
        debug!(
            %scope,
            path = %path,
            fetched = batch.len(),
            inserted = stats.inserted,
            shadowed = stats.shadowed,
            skipped = stats.skipped,
            "merged scope"
        );
    }

    Ok(interpolate(&namespace))
}

/// What to do with the resolved namespace.
#[derive(Debug, Clone)]
pub enum Action {
    /// Print `NAME=VALUE` lines (`-O`).
    Print,
    /// Run a command with the namespace as its environment.
    Exec(ProcessBuilder),
}

/// A validated command line, ready to run.
#[derive(Debug, Clone)]
pub struct Invocation {
    action: Action,
}

impl Invocation {
    /// Checks the command line before anything is fetched.
    ///
    /// `-O` wins over a command; the command is then ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Usage`] when there is neither `-O` nor a command.
    pub fn new(output: bool, command: &[String]) -> LoaderResult<Self> {
        let action = if output {
            if !command.is_empty() {
                debug!(command = ?command, "output requested, command will not run");
            }
            Action::Print
        } else {
            let builder = ProcessBuilder::from_argv(command)
                .ok_or_else(|| LoaderError::usage("no command given (use -O to print the environment)"))?;
            Action::Exec(builder)
        };

        Ok(Self { action })
    }

    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }

    /// Resolves the namespace from `store` and `os_env`, then prints it to
    /// `out` or runs the command with it.
    ///
    /// Opaque OS variables are handed to the command untouched and are
    /// never printed.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure, an I/O error writing `out`, or the
    /// command's launch failure or non-zero exit.
    pub async fn run<S, E, W>(
        self,
        store: &S,
        config: &Config,
        os_env: E,
        out: &mut W,
    ) -> LoaderResult<()>
    where
        S: ParameterStore + ?Sized,
        E: Into<OsEnv>,
        W: Write + ?Sized,
    {
        let OsEnv { vars, opaque } = os_env.into();
        let scopes = Scopes::from_namespace(&vars, &config.scopes);
        debug!(env = ?scopes.env, app = ?scopes.app, "resolved scopes");

        let namespace = resolve_namespace(store, &config.store, vars, &scopes).await?;
        info!(vars = namespace.len(), opaque = opaque.len(), "environment resolved");

        match self.action {
            Action::Print => write_env(&namespace, out),
            Action::Exec(builder) => {
                builder.env(namespace).opaque_env(opaque).run().await?;
                Ok(())
            }
        }
    }
}

/// Writes `NAME=VALUE` lines in key order.
///
/// A reader that goes away early (`-O | head -1`) ends the output quietly.
///
/// # Errors
///
/// Returns [`LoaderError::Io`] if `out` cannot be written.
pub fn write_env<W: Write + ?Sized>(namespace: &Namespace, out: &mut W) -> LoaderResult<()> {
    let written = namespace
        .to_env_list()
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
        .and_then(|()| out.flush());

    match written {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => {
            debug!("output closed by reader");
            Ok(())
        }
        other => Ok(other?),
    }
}
