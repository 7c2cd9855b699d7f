// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starts the Monitor and every worker for one pipeline, waits for the
//! workers to finish, and tears the Engine Gateway down last (§4.7).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use redo_core::EngineGateway;
use tokio::task::JoinSet;

use crate::error::{FatalError, StageError};
use crate::monitor::Monitor;

/// Owns the Engine Gateway for the life of one pipeline run, so it is the
/// last thing dropped once every worker has returned.
pub struct Supervisor {
    gateway: Arc<EngineGateway>,
}

impl Supervisor {
    pub fn new(gateway: Arc<EngineGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<EngineGateway> {
        &self.gateway
    }

    /// Runs `workers` to completion, aborting the rest as soon as one returns
    /// a fatal error, then stops the Monitor. Returns the first fatal error
    /// encountered, if any.
    pub async fn run(self, mut workers: JoinSet<Result<(), StageError>>, monitor: Monitor) -> Result<(), FatalError> {
        let total = workers.len();
        let alive = Arc::new(AtomicUsize::new(total));

        let mut monitor_set = JoinSet::new();
        monitor_set.spawn(monitor.run(total, Arc::clone(&alive)));

        let mut fatal = None;
        while let Some(outcome) = workers.join_next().await {
            alive.fetch_sub(1, Ordering::Relaxed);
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(StageError::Fatal(error))) => {
                    tracing::error!(error = %error, "worker exited fatally, stopping the pipeline");
                    fatal = Some(error);
                    workers.abort_all();
                    break;
                }
                Ok(Err(other)) => {
                    tracing::error!(error = %other, "worker exited with an unrecoverable stage error, stopping the pipeline");
                    fatal = Some(FatalError::UnknownEngineFailure {
                        stage: "worker",
                        message: other.to_string(),
                    });
                    workers.abort_all();
                    break;
                }
                Err(join_error) => {
                    tracing::error!(error = %join_error, "worker task panicked, stopping the pipeline");
                    fatal = Some(FatalError::UnknownEngineFailure {
                        stage: "worker",
                        message: join_error.to_string(),
                    });
                    workers.abort_all();
                    break;
                }
            }
        }
        while workers.join_next().await.is_some() {}

        monitor_set.abort_all();
        while monitor_set.join_next().await.is_some() {}

        match fatal {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
