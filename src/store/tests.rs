// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::fetcher::{FetchScope, Fetcher};
use super::{PageQuery, Parameter, ParameterPage, ParameterStore};
use crate::error::StoreError;

/// A recorded `get_page` call.
#[derive(Debug, Clone)]
struct Call {
    path: String,
    next_token: Option<String>,
    page_size: i32,
    at: Instant,
}

/// In-memory store that pages its contents with numeric cursors.
#[derive(Default)]
struct PagedStore {
    scopes: BTreeMap<String, Vec<Parameter>>,
    fail_on_page: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl PagedStore {
    fn with_scope(mut self, path: &str, count: usize) -> Self {
        let parameters = (0..count)
            .map(|i| Parameter::new(format!("{path}VAR_{i:02}"), i.to_string()))
            .collect();
        self.scopes.insert(path.to_string(), parameters);
        self
    }

    fn failing_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParameterStore for PagedStore {
    async fn get_page(&self, query: PageQuery<'_>) -> Result<ParameterPage, StoreError> {
        self.calls.lock().unwrap().push(Call {
            path: query.path.to_string(),
            next_token: query.next_token.map(str::to_owned),
            page_size: query.page_size,
            at: Instant::now(),
        });

        let page: usize = query.next_token.map_or(0, |t| t.parse().unwrap());
        if self.fail_on_page == Some(page) {
            return Err(StoreError::Request {
                path: query.path.to_string(),
                message: "ThrottlingException: Rate exceeded".to_string(),
            });
        }

        let all = self.scopes.get(query.path).cloned().unwrap_or_default();
        let size = usize::try_from(query.page_size).unwrap();
        let start = page * size;
        let end = (start + size).min(all.len());
        let next_token = (end < all.len()).then(|| (page + 1).to_string());

        Ok(ParameterPage {
            parameters: all.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
            next_token,
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_fetch_paginates_with_delay_between_pages() {
    let store = PagedStore::default().with_scope("/prod/", 25);

    let parameters = Fetcher::new(&store).fetch_all("/prod/").await.unwrap();

    assert_eq!(parameters.len(), 25);
    assert_eq!(parameters[0].name, "/prod/VAR_00");
    assert_eq!(parameters[24].name, "/prod/VAR_24");

    let calls = store.calls();
    let tokens: Vec<_> = calls.iter().map(|c| c.next_token.as_deref()).collect();
    assert_eq!(tokens, vec![None, Some("1"), Some("2")]);
    assert!(calls.iter().all(|c| c.page_size == 10 && c.path == "/prod/"));

    for pair in calls.windows(2) {
        let gap = pair[1].at - pair[0].at;
        assert!(gap >= Duration::from_millis(100), "gap was {gap:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_page_has_no_delay() {
    let store = PagedStore::default().with_scope("/prod/", 4);
    let start = Instant::now();

    let parameters = Fetcher::new(&store).fetch_all("/prod/").await.unwrap();

    assert_eq!(parameters.len(), 4);
    assert_eq!(store.calls().len(), 1);
    assert_eq!(Instant::now() - start, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_empty_scope_returns_empty_batch() {
    let store = PagedStore::default();

    let parameters = Fetcher::new(&store).fetch_all("/missing/").await.unwrap();

    assert!(parameters.is_empty());
    assert_eq!(store.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_page_size_and_delay() {
    let store = PagedStore::default().with_scope("/qa/", 9);

    let parameters = Fetcher::new(&store)
        .page_size(3)
        .page_delay(Duration::from_millis(250))
        .fetch_all("/qa/")
        .await
        .unwrap();

    assert_eq!(parameters.len(), 9);
    let calls = store.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.page_size == 3));
    assert!(calls[2].at - calls[0].at >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_error_on_later_page_aborts() {
    let store = PagedStore::default()
        .with_scope("/prod/", 25)
        .failing_on_page(1);

    let err = Fetcher::new(&store).fetch_all("/prod/").await.unwrap_err();

    assert!(matches!(err, StoreError::Request { .. }));
    assert_eq!(store.calls().len(), 2);
}

#[test]
fn test_fetch_scope_lifecycle() {
    let mut scope = FetchScope::new("/prod/");
    assert_eq!(scope.query(10).next_token, None);
    assert_eq!(scope.pages(), 0);

    assert!(scope.advance(Some("abc".to_string())));
    assert_eq!(scope.next_token(), Some("abc"));
    assert_eq!(scope.query(10).next_token, Some("abc"));

    // An empty cursor would otherwise loop on the same page forever.
    assert!(!scope.advance(Some(String::new())));
    assert_eq!(scope.next_token(), None);
    assert_eq!(scope.pages(), 2);
    assert_eq!(scope.path(), "/prod/");
}

#[test]
fn test_bare_name() {
    let cases = [
        ("/prod/app/DB_HOST", "DB_HOST"),
        ("/prod/DB_HOST", "DB_HOST"),
        ("DB_HOST", "DB_HOST"),
        ("/prod/app/", ""),
    ];
    for (name, expected) in cases {
        assert_eq!(Parameter::new(name, "v").bare_name(), expected, "{name}");
    }
}
