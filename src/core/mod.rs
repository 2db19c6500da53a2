// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for environment and process management.
//!
//! ```text
//!          core
//!           |
//!     +-----+------+
//!     |            |
//!     v            v
//!    env        process
//!     |            |
//!  Namespace   ProcessBuilder
//!  interpolate run() -> exit status
//! ```

pub mod env;
pub mod process;
