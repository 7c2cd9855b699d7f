// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `pull-from-engine` Input role (§4.6).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redo_core::{classify_pull_error, AckTag, Counters, EngineFailureKind, EngineGateway, PullOutcome, RedoRecord};

use crate::error::{FatalError, StageError};
use crate::roles::Input;

/// Drains the engine's redo backlog directly, retrying transient database
/// errors up to a fixed limit before giving up.
pub struct EnginePullInput {
    gateway: Arc<EngineGateway>,
    counters: Arc<Counters>,
    redo_sleep_time: Duration,
    redo_retry_sleep_time: Duration,
    redo_retry_limit: u32,
}

impl EnginePullInput {
    pub fn new(
        gateway: Arc<EngineGateway>,
        counters: Arc<Counters>,
        redo_sleep_time: Duration,
        redo_retry_sleep_time: Duration,
        redo_retry_limit: u32,
    ) -> Self {
        Self {
            gateway,
            counters,
            redo_sleep_time,
            redo_retry_sleep_time,
            redo_retry_limit,
        }
    }
}

#[async_trait]
impl Input for EnginePullInput {
    async fn next(&self) -> Result<Option<(RedoRecord, AckTag)>, StageError> {
        let mut attempt: u32 = 0;
        loop {
            match self.gateway.pull_redo().await {
                Ok(PullOutcome::Record(record)) => {
                    self.counters.inc_redo_records_from_engine();
                    return Ok(Some((record, AckTag::None)));
                }
                Ok(PullOutcome::Empty) => {
                    tokio::time::sleep(self.redo_sleep_time).await;
                }
                Err(error) => match classify_pull_error(&error) {
                    EngineFailureKind::DbTransient if attempt < self.redo_retry_limit => {
                        attempt += 1;
                        tracing::warn!(
                            attempt,
                            limit = self.redo_retry_limit,
                            error = %error,
                            "pull_redo hit a transient database error, retrying"
                        );
                        tokio::time::sleep(self.redo_retry_sleep_time).await;
                    }
                    kind => {
                        tracing::error!(?kind, error = %error, "pull_redo failed fatally");
                        return Err(StageError::Fatal(FatalError::UnknownEngineFailure {
                            stage: "pull",
                            message: error.to_string(),
                        }));
                    }
                },
            }
        }
    }

    async fn acknowledge(&self, _tag: AckTag) -> Result<(), StageError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "pull_tests.rs"]
mod tests;
