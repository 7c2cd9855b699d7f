// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    not_initialized = { EngineError::NotInitialized("boom".into()), EngineFailureKind::Fatal },
    connection_failure = { EngineError::Generic("Database Connection Failure".into()), EngineFailureKind::DbTransient },
    connection_lost = { EngineError::Generic("Database Connection Lost".into()), EngineFailureKind::DbTransient },
    anything_else = { EngineError::Generic("disk full".into()), EngineFailureKind::Fatal },
)]
fn pull_classification(error: EngineError, expected: EngineFailureKind) {
    assert_eq!(classify_pull_error(&error), expected);
}

#[yare::parameterized(
    not_initialized = { EngineError::NotInitialized("boom".into()), "A", "A", EngineFailureKind::Fatal },
    db_transient_wins_over_drift = { EngineError::Generic("Database Connection Lost".into()), "A", "B", EngineFailureKind::DbTransient },
    config_drift = { EngineError::Generic("weird engine state".into()), "A", "B", EngineFailureKind::ConfigDrift },
    unknown_nonfatal = { EngineError::Generic("weird engine state".into()), "A", "A", EngineFailureKind::UnknownNonfatal },
)]
fn apply_classification(
    error: EngineError,
    active_config_id: &str,
    default_config_id: &str,
    expected: EngineFailureKind,
) {
    assert_eq!(
        classify_apply_error(&error, active_config_id, default_config_id),
        expected
    );
}
