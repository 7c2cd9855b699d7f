// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin contract around the opaque entity-resolution engine handle.
//!
//! The handle is assumed not safe for concurrent use. [`EngineGateway`] upholds
//! that by serializing every call behind a single mutex, rather than trusting
//! the underlying library to serialize internally.

use crate::record::{InfoEnvelope, RedoRecord};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// An error surfaced by any engine operation.
///
/// `NotInitialized` always maps to the fatal classifier outcome; `Generic`
/// carries the raw engine message text, which the classifier (`classify`
/// module) pattern-matches against the two known transient-error markers.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("engine not initialized: {0}")]
    NotInitialized(String),
    #[error("{0}")]
    Generic(String),
}

/// Outcome of a single `pull_redo` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    Record(RedoRecord),
    Empty,
}

/// The six operations the daemon needs from the native engine handle.
///
/// Implementations are free to wrap an FFI binding, an HTTP shim, or (as in
/// this crate's tests) an in-memory fake; this crate never assumes which.
#[async_trait]
pub trait EngineHandle: Send + Sync {
    async fn pull_redo(&self) -> Result<PullOutcome, EngineError>;
    async fn apply(&self, record: &RedoRecord) -> Result<(), EngineError>;
    async fn apply_with_info(&self, record: &RedoRecord) -> Result<InfoEnvelope, EngineError>;
    async fn active_config_id(&self) -> Result<String, EngineError>;
    async fn default_config_id(&self) -> Result<String, EngineError>;
    async fn reinit(&self, config_id: &str) -> Result<(), EngineError>;
    async fn stats(&self) -> Result<serde_json::Value, EngineError>;
}

/// Serializing wrapper around a boxed [`EngineHandle`].
///
/// Every method locks the same mutex for the duration of the inner call,
/// so two workers can never be inside the native handle at once.
pub struct EngineGateway {
    inner: Mutex<Box<dyn EngineHandle>>,
}

impl EngineGateway {
    pub fn new(handle: Box<dyn EngineHandle>) -> Self {
        Self {
            inner: Mutex::new(handle),
        }
    }

    pub async fn pull_redo(&self) -> Result<PullOutcome, EngineError> {
        self.inner.lock().await.pull_redo().await
    }

    pub async fn apply(&self, record: &RedoRecord) -> Result<(), EngineError> {
        self.inner.lock().await.apply(record).await
    }

    pub async fn apply_with_info(
        &self,
        record: &RedoRecord,
    ) -> Result<InfoEnvelope, EngineError> {
        self.inner.lock().await.apply_with_info(record).await
    }

    pub async fn active_config_id(&self) -> Result<String, EngineError> {
        self.inner.lock().await.active_config_id().await
    }

    pub async fn default_config_id(&self) -> Result<String, EngineError> {
        self.inner.lock().await.default_config_id().await
    }

    pub async fn reinit(&self, config_id: &str) -> Result<(), EngineError> {
        self.inner.lock().await.reinit(config_id).await
    }

    pub async fn stats(&self) -> Result<serde_json::Value, EngineError> {
        self.inner.lock().await.stats().await
    }
}

/// Alias kept for call sites that only care whether an operation succeeded,
/// matching the `(value, status)` shape the component design describes.
pub type EngineStatus = Result<(), EngineError>;

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
