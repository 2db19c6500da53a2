// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Paginated retrieval of every parameter under a path prefix.
//!
//! ```text
//! FetchScope { path, next_token: None, pages: 0 }
//!     |
//!     v
//! get_page ---> extend results
//!     |
//!     +-- next_token = Some(t) --> sleep(page_delay) --> get_page(t)
//!     +-- next_token = None    --> done
//! ```
//!
//! The loop keeps stack usage flat no matter how many pages a scope has.

use std::time::Duration;

use tracing::{debug, trace};

use super::{PageQuery, Parameter, ParameterStore};
use crate::config::types::StoreConfig;
use crate::error::StoreError;

/// Default number of parameters per page (the service maximum).
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Default pause between pages, to stay clear of API throttling.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);

/// State of one paginated query session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchScope {
    path: String,
    next_token: Option<String>,
    pages: usize,
}

impl FetchScope {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            next_token: None,
            pages: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    /// Pages fetched so far.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Query for the next page.
    #[must_use]
    pub fn query(&self, page_size: i32) -> PageQuery<'_> {
        PageQuery {
            path: &self.path,
            next_token: self.next_token.as_deref(),
            page_size,
        }
    }

    /// Records a received page. Returns `false` once pagination is exhausted.
    ///
    /// An empty token counts as exhausted.
    pub fn advance(&mut self, next_token: Option<String>) -> bool {
        self.pages += 1;
        self.next_token = next_token.filter(|token| !token.is_empty());
        self.next_token.is_some()
    }
}

/// Drains every page under a path prefix.
#[derive(Debug)]
pub struct Fetcher<'s, S: ?Sized> {
    store: &'s S,
    page_size: i32,
    page_delay: Duration,
}

impl<'s, S: ParameterStore + ?Sized> Fetcher<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Creates a fetcher with page size and delay taken from `[store]`.
    pub const fn from_config(store: &'s S, config: &StoreConfig) -> Self {
        Self::new(store)
            .page_size(config.page_size)
            .page_delay(config.page_delay())
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Fetches all parameters directly under `path`, in arrival order.
    ///
    /// The first page is requested immediately; every following page waits
    /// `page_delay` first.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError`; results of earlier pages are dropped.
    pub async fn fetch_all(&self, path: &str) -> Result<Vec<Parameter>, StoreError> {
        let mut scope = FetchScope::new(path);
        let mut parameters = Vec::new();

        loop {
            if scope.pages() > 0 {
                trace!(path, delay = ?self.page_delay, "pacing");
                tokio::time::sleep(self.page_delay).await;
            }

            let page = self.store.get_page(scope.query(self.page_size)).await?;
            debug!(
                path,
                page = scope.pages() + 1,
                count = page.parameters.len(),
                more = page.next_token.is_some(),
                "fetched page"
            );
            parameters.extend(page.parameters);

            if !scope.advance(page.next_token) {
                break;
            }
        }

        debug!(path, pages = scope.pages(), total = parameters.len(), "scope exhausted");
        Ok(parameters)
    }
}
