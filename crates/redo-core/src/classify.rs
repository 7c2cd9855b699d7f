// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maps engine failures into the four kinds the rest of the daemon reacts to.

use crate::gateway::EngineError;

/// The four failure kinds an Execute or Input stage can observe from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFailureKind {
    /// engine-not-initialized, or an unexpected exception during pull.
    Fatal,
    /// A non-transient apply failure while `active_config_id != default_config_id`.
    ConfigDrift,
    /// Error text matches one of the two known database-connectivity markers.
    DbTransient,
    /// Everything else.
    UnknownNonfatal,
}

const DB_TRANSIENT_MARKERS: [&str; 2] =
    ["Database Connection Failure", "Database Connection Lost"];

fn is_db_transient(message: &str) -> bool {
    DB_TRANSIENT_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Classify a failure from `pull_redo`. Per §4.6, pull has no config-drift
/// concept: anything that is not db-transient and not already fatal is
/// treated as fatal, since the pull loop has no apply to retry against.
pub fn classify_pull_error(error: &EngineError) -> EngineFailureKind {
    match error {
        EngineError::NotInitialized(_) => EngineFailureKind::Fatal,
        EngineError::Generic(message) => {
            if is_db_transient(message) {
                EngineFailureKind::DbTransient
            } else {
                EngineFailureKind::Fatal
            }
        }
    }
}

/// Classify a failure from `apply` or `apply_with_info`, given the engine's
/// active and default config ids at the moment of failure.
pub fn classify_apply_error(
    error: &EngineError,
    active_config_id: &str,
    default_config_id: &str,
) -> EngineFailureKind {
    match error {
        EngineError::NotInitialized(_) => EngineFailureKind::Fatal,
        EngineError::Generic(message) => {
            if is_db_transient(message) {
                EngineFailureKind::DbTransient
            } else if active_config_id != default_config_id {
                EngineFailureKind::ConfigDrift
            } else {
                EngineFailureKind::UnknownNonfatal
            }
        }
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
