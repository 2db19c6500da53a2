// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> Invocation::new (usage check)
//!          --> Invocation::run
//!                Scopes --> fetch + merge --> interpolate
//!                --> print (-O) | exec child
//! ```

pub mod run;
