// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    ConfigError, FetchError, LoaderError, LoaderResult, ProcessError, ScopeKind, StoreError,
};

#[test]
fn test_fetch_error_names_scope() {
    let err = LoaderError::from(FetchError {
        scope: ScopeKind::App,
        path: "/prod/billing/".to_string(),
        source: StoreError::Request {
            path: "/prod/billing/".to_string(),
            message: "AccessDeniedException".to_string(),
        },
    });
    insta::assert_snapshot!(
        err.to_string(),
        @"error fetching app params from '/prod/billing/': request for '/prod/billing/' failed: AccessDeniedException"
    );
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "store".to_string(),
        key: "page_size".to_string(),
        message: "must be between 1 and 10, got 0".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'page_size' in section '[store]': must be between 1 and 10, got 0"
    );
}

#[test]
fn test_exit_codes() {
    let codes = vec![
        ("usage", LoaderError::usage("no command").exit_code()),
        (
            "child_exit_3",
            LoaderError::from(ProcessError::NonZeroExit {
                command: "false".to_string(),
                code: 3,
            })
            .exit_code(),
        ),
        (
            "signal_15",
            LoaderError::from(ProcessError::Signaled {
                command: "sleep".to_string(),
                signal: 15,
            })
            .exit_code(),
        ),
        (
            "not_found",
            LoaderError::from(ProcessError::ExecutableNotFound {
                name: "nope".to_string(),
            })
            .exit_code(),
        ),
        (
            "out_of_range",
            LoaderError::from(ProcessError::NonZeroExit {
                command: "cmd".to_string(),
                code: 1024,
            })
            .exit_code(),
        ),
    ];
    assert_eq!(
        codes,
        vec![
            ("usage", 2),
            ("child_exit_3", 3),
            ("signal_15", 143),
            ("not_found", 1),
            ("out_of_range", 1),
        ]
    );
}

#[test]
fn test_launch_failure_classification() {
    let not_found = ProcessError::ExecutableNotFound {
        name: "nope".to_string(),
    };
    let exited = ProcessError::NonZeroExit {
        command: "false".to_string(),
        code: 1,
    };
    assert!(not_found.is_launch_failure());
    assert!(!not_found.is_child_exit());
    assert!(!exited.is_launch_failure());
    assert!(exited.is_child_exit());
}

#[test]
fn test_loader_result_size() {
    let size = std::mem::size_of::<LoaderResult<()>>();
    assert!(size <= 24, "LoaderResult<()> is {size} bytes, expected <= 24");
}
