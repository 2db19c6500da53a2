// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder.
//!
//! ```text
//! ProcessBuilder
//!  • new/from_argv
//!  • arg/args/env/opaque_env/cwd
//!  • resolve() -> absolute executable path
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::env::namespace::Namespace;
use crate::error::ProcessError;

/// Builder for the command the loader hands its namespace to.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    /// Executable name or path, as given
    program: String,
    /// Command-line arguments
    args: Vec<String>,
    /// Child environment
    env: Namespace,
    /// Non UTF-8 variables, added after `env`
    opaque_env: Vec<(OsString, OsString)>,
    /// Working directory, defaults to the loader's own
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// A bare name is looked up in the `PATH` of the configured environment
    /// when the process runs, not in the loader's own.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Namespace::new(),
            opaque_env: Vec::new(),
            cwd: None,
        }
    }

    /// Splits `argv` into program and arguments.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.as_str()).args(args))
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replaces the child environment. Nothing from the loader's own
    /// environment is inherited beyond what `env` contains.
    #[must_use]
    pub fn env(mut self, env: Namespace) -> Self {
        self.env = env;
        self
    }

    /// Adds variables that cannot live in a [`Namespace`]. They are passed
    /// to the child as is.
    #[must_use]
    pub fn opaque_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        self.opaque_env.extend(vars);
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn environment(&self) -> &Namespace {
        &self.env
    }

    pub(super) fn opaque_environment(&self) -> &[(OsString, OsString)] {
        &self.opaque_env
    }

    pub(super) fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Resolves the program against the child's `PATH`.
    ///
    /// Names containing a path separator are resolved relative to the
    /// working directory instead.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ExecutableNotFound`] if no executable matches.
    pub fn resolve(&self) -> Result<PathBuf, ProcessError> {
        let cwd = match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        let paths = self.env.get("PATH").map(OsStr::new);

        which::which_in(&self.program, paths, cwd).map_err(|_| ProcessError::ExecutableNotFound {
            name: self.program.clone(),
        })
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}
