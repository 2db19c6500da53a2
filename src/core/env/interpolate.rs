// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `%%NAME%%` substitution over a namespace.
//!
//! ```text
//! "postgres://%%DB_USER%%@%%DB_HOST%%/app"
//!              |             |
//!              v             v
//!        snapshot.get   snapshot.get      (missing -> "")
//!              |             |
//!              v             v
//! "postgres://admin@db.internal/app"
//! ```
//!
//! One pass, no re-expansion. Every lookup reads the namespace as it was
//! before the pass, so the result does not depend on key order. A token
//! ends at the first closing `%%` and never spans a newline.

use tracing::trace;

use super::namespace::Namespace;

/// Token delimiter.
pub const DELIMITER: &str = "%%";

/// Resolves every token in every value of `namespace`.
#[must_use]
pub fn interpolate(namespace: &Namespace) -> Namespace {
    namespace.map_values(|snapshot, key, value| {
        let resolved = resolve_value(value, |name| snapshot.get(name));
        if resolved != value {
            trace!(key, "interpolated");
        }
        resolved
    })
}

/// Replaces each `%%name%%` in `value` with `lookup(name)`, or `""` when
/// the lookup yields nothing. Unterminated delimiters are copied verbatim.
///
/// ```
/// use ssm_loader::core::env::interpolate::resolve_value;
///
/// let resolved = resolve_value("prefix-%%A%%-%%B%%", |name| match name {
///     "A" => Some("1"),
///     "B" => Some("2"),
///     _ => None,
/// });
/// assert_eq!(resolved, "prefix-1-2");
/// ```
pub fn resolve_value<'a, F>(value: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut search_from = 0;

    while let Some(offset) = rest[search_from..].find(DELIMITER) {
        let open = search_from + offset;
        let name_start = open + DELIMITER.len();
        let line_end = rest[name_start..]
            .find('\n')
            .map_or(rest.len(), |n| name_start + n);

        match rest[name_start..line_end].find(DELIMITER) {
            Some(len) => {
                let name_end = name_start + len;
                out.push_str(&rest[..open]);
                out.push_str(lookup(&rest[name_start..name_end]).unwrap_or_default());
                rest = &rest[name_end + DELIMITER.len()..];
                search_from = 0;
            }
            // No closing delimiter on this line: retry one byte further,
            // a later `%%` may still open a token.
            None => search_from = open + 1,
        }
    }

    out.push_str(rest);
    out
}
