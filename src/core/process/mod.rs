// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Child process launch with a fully replaced environment.
//!
//! ```text
//! ProcessBuilder::from_argv(["cmd", "arg", ...])
//!   .env(namespace)
//!   .run()
//!       --> which_in(cmd, namespace PATH)
//!       --> tokio::process::Command
//!           env_clear + namespace, stdio inherited
//!           Ctrl-C ignored while the child runs
//!       --> Ok(()) | NonZeroExit { code } | Signaled { signal }
//! ```

pub mod builder;
mod runner;
