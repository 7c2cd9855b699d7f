// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three stage interfaces every worker is assembled from.

use std::sync::Arc;

use async_trait::async_trait;
use redo_core::{AckTag, InfoEnvelope, RedoRecord};

use crate::error::StageError;

/// Produces the infinite stream of records a Worker drains.
#[async_trait]
pub trait Input: Send + Sync {
    /// Blocks until a record is available. Returns `None` only when the
    /// underlying source has terminated for good (the Worker then exits).
    async fn next(&self) -> Result<Option<(RedoRecord, AckTag)>, StageError>;

    /// No-op for carriers whose `AckTag` is `AckTag::None`.
    async fn acknowledge(&self, tag: AckTag) -> Result<(), StageError>;
}

/// The outcome of processing one record.
pub struct Processed {
    pub success: bool,
    pub info: Option<InfoEnvelope>,
}

impl Processed {
    pub fn success() -> Self {
        Self { success: true, info: None }
    }

    pub fn success_with_info(info: InfoEnvelope) -> Self {
        Self { success: true, info: Some(info) }
    }

    pub fn retry() -> Self {
        Self { success: false, info: None }
    }
}

/// Applies (or forwards) a single record.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn process(&self, record: &RedoRecord) -> Result<Processed, StageError>;
}

/// Disposes of a record after a terminal outcome.
#[async_trait]
pub trait Output: Send + Sync {
    async fn send_info(&self, envelope: InfoEnvelope) -> Result<(), StageError>;
    async fn send_failure(&self, record: RedoRecord) -> Result<(), StageError>;
}

/// An `Output` that only logs — used by every subcommand whose table entry is
/// `log-only`.
pub struct LogOnlyOutput;

#[async_trait]
impl Output for LogOnlyOutput {
    async fn send_info(&self, envelope: InfoEnvelope) -> Result<(), StageError> {
        tracing::debug!(len = envelope.len(), "info envelope discarded (log-only output)");
        Ok(())
    }

    async fn send_failure(&self, record: RedoRecord) -> Result<(), StageError> {
        tracing::warn!(len = record.len(), "failed record discarded (log-only output)");
        Ok(())
    }
}

/// An `Output` that publishes info envelopes and failure records onto their
/// own transport adapters — the `info` and `failure` role endpoints (§6.2)
/// are distinct queues/topics, so each gets its own adapter instance.
pub struct PublishOutput<T> {
    info_adapter: T,
    failure_adapter: T,
}

impl<T> PublishOutput<T> {
    pub fn new(info_adapter: T, failure_adapter: T) -> Self {
        Self { info_adapter, failure_adapter }
    }
}

#[async_trait]
impl<T: redo_adapters::TransportAdapter> Output for PublishOutput<T> {
    async fn send_info(&self, envelope: InfoEnvelope) -> Result<(), StageError> {
        let record = RedoRecord::new(envelope.into_string());
        self.info_adapter.publish(&record).await.map_err(StageError::from)
    }

    async fn send_failure(&self, record: RedoRecord) -> Result<(), StageError> {
        self.failure_adapter.publish(&record).await.map_err(StageError::from)
    }
}

/// Lets an `Arc<dyn Output>` stand in for a concrete `Output` — the Supervisor
/// picks a concrete Output per subcommand and erases it to this before handing
/// it to `ApplyExecute`.
#[async_trait]
impl Output for Arc<dyn Output> {
    async fn send_info(&self, envelope: InfoEnvelope) -> Result<(), StageError> {
        (**self).send_info(envelope).await
    }

    async fn send_failure(&self, record: RedoRecord) -> Result<(), StageError> {
        (**self).send_failure(record).await
    }
}
