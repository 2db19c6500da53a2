// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            LoaderError (~24 bytes)
//!                   |
//!   +-------+-------+-------+-------+
//!   |       |       |       |       |
//!   v       v       v       v       v
//! Usage   Fetch  Process  Config   Io
//! Box<str> Box    Box      Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Fetch    scope (shared|app) + path + StoreError
//!   Store    Request, MalformedParameter
//!   Process  ExecutableNotFound, SpawnFailed   (launch)
//!            NonZeroExit, Signaled             (child exit)
//!   Config   InvalidValue
//! ```
//!
//! Exit codes: usage 2, child exit = child's code, signal = 128 + n, rest 1.

use std::fmt;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`LoaderError`].
pub type LoaderResult<T> = std::result::Result<T, LoaderError>;

/// Exit code used for command-line usage errors.
pub const USAGE_EXIT_CODE: u8 = 2;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The command line was incomplete (no command to run).
    #[error("usage error: {0}")]
    Usage(Box<str>),

    /// A parameter store scope could not be fetched.
    #[error(transparent)]
    Fetch(#[from] Box<FetchError>),

    /// The child process could not be launched or did not succeed.
    #[error(transparent)]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl LoaderError {
    /// Creates a [`LoaderError::Usage`].
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into().into_boxed_str())
    }

    /// Process exit code this error should terminate the loader with.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => USAGE_EXIT_CODE,
            Self::Process(err) => err.exit_code(),
            Self::Fetch(_) | Self::Config(_) | Self::Io(_) => 1,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for LoaderError {
                fn from(err: $error) -> Self {
                    LoaderError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    FetchError => Fetch,
    ProcessError => Process,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Store Errors ---

/// Errors raised by a single parameter store call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request failed (network, auth, throttling, service error).
    #[error("request for '{path}' failed: {message}")]
    Request { path: String, message: String },

    /// The store returned a parameter without a required field.
    #[error("parameter under '{path}' is missing its {field}")]
    MalformedParameter { path: String, field: &'static str },
}

// --- Fetch Errors ---

/// Which of the two parameter scopes a fetch belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Environment-wide parameters (`/{env}/`).
    Shared,
    /// Application parameters (`/{env}/{app}/`).
    App,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::App => write!(f, "app"),
        }
    }
}

/// A scope could not be fully paginated.
#[derive(Debug, Error)]
#[error("error fetching {scope} params from '{path}': {source}")]
pub struct FetchError {
    pub scope: ScopeKind,
    pub path: String,
    #[source]
    pub source: StoreError,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Child process errors.
///
/// `ExecutableNotFound` and `SpawnFailed` mean the child never started;
/// `NonZeroExit` and `Signaled` mean it ran and failed.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in the resolved PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("error while starting command '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting for the process.
    #[error("error while waiting for command '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("command '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process was terminated by a signal.
    #[error("command '{command}' was terminated by signal {signal}")]
    Signaled { command: String, signal: i32 },
}

impl ProcessError {
    /// Returns true when the child never started.
    #[must_use]
    pub const fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound { .. } | Self::SpawnFailed { .. }
        )
    }

    /// Returns true when the child ran and exited unsuccessfully.
    #[must_use]
    pub const fn is_child_exit(&self) -> bool {
        matches!(self, Self::NonZeroExit { .. } | Self::Signaled { .. })
    }

    /// Exit code to propagate for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NonZeroExit { code, .. } => {
                u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1)
            }
            Self::Signaled { signal, .. } => u8::try_from(128 + signal).unwrap_or(1),
            Self::ExecutableNotFound { .. }
            | Self::SpawnFailed { .. }
            | Self::WaitFailed { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests;
