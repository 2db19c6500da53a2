// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flat variable namespace with first-write-wins semantics.
//!
//! ```text
//! Namespace (BTreeMap<String, String>, lexicographic order)
//!
//! seed(os env)        ──┐
//! merge(shared batch) ──┼── insert_if_absent: an existing key is never replaced
//! merge(app batch)    ──┘
//!        |
//!        v
//! interpolate() --> to_env_list() ["NAME=VALUE", ...]
//! ```
//!
//! Keys are case-sensitive, matching the process environment on Unix.
//!
//! A reserved key has no value here but still counts as defined, so later
//! sources cannot claim it. The process environment reserves the names of
//! variables whose values are not UTF-8.

use std::collections::{BTreeMap, BTreeSet};
use std::collections::btree_map::Entry;

use tracing::{trace, warn};

use crate::store::Parameter;

/// Outcome of merging one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// New keys written.
    pub inserted: usize,
    /// Parameters whose bare name was already present.
    pub shadowed: usize,
    /// Parameters with an empty bare name.
    pub skipped: usize,
}

/// Name → value mapping that never overwrites an existing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    vars: BTreeMap<String, String>,
    reserved: BTreeSet<String>,
}

impl Namespace {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
            reserved: BTreeSet::new(),
        }
    }

    /// Creates a namespace from `(name, value)` pairs, first occurrence wins.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut namespace = Self::new();
        namespace.seed(vars);
        namespace
    }

    /// Inserts `value` under `key` unless the key already exists.
    ///
    /// Returns `true` if the value was written.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.reserved.contains(&key) {
            return false;
        }
        match self.vars.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Marks `key` as defined without storing a value.
    ///
    /// Returns `false` if the key already has a value.
    pub fn reserve(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.vars.contains_key(&key) {
            return false;
        }
        self.reserved.insert(key)
    }

    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved.contains(key)
    }

    /// Seeds the namespace with the highest-precedence source.
    ///
    /// Returns the number of keys written.
    pub fn seed<I, K, V>(&mut self, vars: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut written = 0;
        for (key, value) in vars {
            if self.insert_if_absent(key, value) {
                written += 1;
            }
        }
        written
    }

    /// Merges a fetched batch keyed by each parameter's bare name.
    ///
    /// Names already present (from the seed, an earlier batch, or earlier in
    /// this batch) are left untouched.
    pub fn merge<'a, I>(&mut self, batch: I) -> MergeStats
    where
        I: IntoIterator<Item = &'a Parameter>,
    {
        let mut stats = MergeStats::default();

        for param in batch {
            let bare = param.bare_name();
            if bare.is_empty() {
                warn!(name = %param.name, "skipping parameter with empty name segment");
                stats.skipped += 1;
            } else if self.insert_if_absent(bare, param.value.as_str()) {
                stats.inserted += 1;
            } else {
                trace!(name = %param.name, key = bare, "already defined, keeping existing value");
                stats.shadowed += 1;
            }
        }

        stats
    }

    /// Gets a value. Reserved keys have none.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterates in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Flattens to `NAME=VALUE` strings.
    #[must_use]
    pub fn to_env_list(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Replaces every value using `rewrite`, which sees the untouched
    /// namespace and the key being rewritten.
    pub(super) fn map_values<F>(&self, mut rewrite: F) -> Self
    where
        F: FnMut(&Self, &str, &str) -> String,
    {
        let vars = self
            .vars
            .iter()
            .map(|(key, value)| (key.clone(), rewrite(self, key, value)))
            .collect();
        Self {
            vars,
            reserved: self.reserved.clone(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Namespace {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_vars(iter)
    }
}
