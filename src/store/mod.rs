// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hierarchical parameter store access.
//!
//! ```text
//! Fetcher::new(&store).page_size(10).page_delay(100ms)
//!     .fetch_all("/prod/")
//!          |
//!          v  loop until next_token is None
//!   ParameterStore::get_page(PageQuery { path, next_token, page_size })
//!          |                       (sleep page_delay between pages)
//!          v
//!   ParameterPage { parameters, next_token }
//!          |
//!          v
//!   Vec<Parameter> in arrival order
//!
//! ParameterStore impls: SsmStore (aws-sdk-ssm), test stubs
//! ```

pub mod fetcher;
pub mod ssm;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::error::StoreError;

/// A parameter as returned by the store, value already decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Full hierarchical name, e.g. `/prod/billing/DB_HOST`.
    pub name: String,
    /// Plain-text value.
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Final `/`-delimited segment of the name.
    ///
    /// ```
    /// use ssm_loader::store::Parameter;
    ///
    /// assert_eq!(Parameter::new("/prod/app/DB_HOST", "x").bare_name(), "DB_HOST");
    /// assert_eq!(Parameter::new("PLAIN", "x").bare_name(), "PLAIN");
    /// ```
    #[must_use]
    pub fn bare_name(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map_or(self.name.as_str(), |(_, bare)| bare)
    }
}

/// One page request: direct children of `path`, decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery<'a> {
    pub path: &'a str,
    pub next_token: Option<&'a str>,
    pub page_size: i32,
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    /// Continuation cursor; `None` on the last page.
    pub next_token: Option<String>,
}

/// A store that lists parameters under a path prefix, one page per call.
///
/// Implementations issue non-recursive queries with decryption enabled.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetches a single page.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the request fails or the response is malformed.
    async fn get_page(&self, query: PageQuery<'_>) -> Result<ParameterPage, StoreError>;
}

