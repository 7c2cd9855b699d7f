// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A self-contained [`EngineHandle`] for the cases where this port does not
//! attempt FFI to a real entity-resolution engine (see the crate-level
//! Non-goals). Drives the daemon end-to-end against a synthetic backlog;
//! every stage role is otherwise indifferent to where its engine handle
//! comes from.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::gateway::{EngineError, EngineHandle, PullOutcome};
use crate::record::{InfoEnvelope, RedoRecord};

/// An in-memory backlog plus a mutable "active config id" that `reinit`
/// can change, so config-drift recovery has something real to exercise.
pub struct InMemoryEngine {
    backlog: Mutex<VecDeque<RedoRecord>>,
    active_config_id: Mutex<String>,
    default_config_id: String,
}

impl InMemoryEngine {
    pub fn new(default_config_id: impl Into<String>, backlog: impl IntoIterator<Item = RedoRecord>) -> Self {
        let default_config_id = default_config_id.into();
        Self {
            backlog: Mutex::new(backlog.into_iter().collect()),
            active_config_id: Mutex::new(default_config_id.clone()),
            default_config_id,
        }
    }
}

#[async_trait]
impl EngineHandle for InMemoryEngine {
    async fn pull_redo(&self) -> Result<PullOutcome, EngineError> {
        match self.backlog.lock().await.pop_front() {
            Some(record) => Ok(PullOutcome::Record(record)),
            None => Ok(PullOutcome::Empty),
        }
    }

    async fn apply(&self, _record: &RedoRecord) -> Result<(), EngineError> {
        Ok(())
    }

    async fn apply_with_info(&self, record: &RedoRecord) -> Result<InfoEnvelope, EngineError> {
        Ok(InfoEnvelope::new(format!(r#"{{"applied":"{record}"}}"#)))
    }

    async fn active_config_id(&self) -> Result<String, EngineError> {
        Ok(self.active_config_id.lock().await.clone())
    }

    async fn default_config_id(&self) -> Result<String, EngineError> {
        Ok(self.default_config_id.clone())
    }

    async fn reinit(&self, config_id: &str) -> Result<(), EngineError> {
        *self.active_config_id.lock().await = config_id.to_string();
        Ok(())
    }

    async fn stats(&self) -> Result<serde_json::Value, EngineError> {
        let remaining = self.backlog.lock().await.len();
        Ok(serde_json::json!({ "workload": { "redoRecordsRemaining": remaining } }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
