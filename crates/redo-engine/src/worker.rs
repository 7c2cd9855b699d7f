// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Worker loop invariant (§4.4): govern, execute, acknowledge iff
//! processed, count, repeat until the Input is exhausted.

use std::sync::Arc;

use redo_core::Governor;

use crate::error::StageError;
use crate::roles::{Execute, Input};

/// One long-running task draining an `Input` through an `Execute`.
///
/// Stored as trait objects: a Supervisor wires up a different concrete
/// (Input, Execute) pair per subcommand, and a single `JoinSet` needs every
/// worker's `run` future to share one type regardless of which carrier or
/// apply role it was built from.
pub struct Worker {
    name: String,
    input: Arc<dyn Input>,
    execute: Arc<dyn Execute>,
    governor: Arc<dyn Governor>,
}

impl Worker {
    pub fn new(name: impl Into<String>, input: Arc<dyn Input>, execute: Arc<dyn Execute>, governor: Arc<dyn Governor>) -> Self {
        Self {
            name: name.into(),
            input,
            execute,
            governor,
        }
    }

    /// Runs until the Input signals it has terminated for good (`Ok(None)`)
    /// or a stage returns a fatal error.
    pub async fn run(self) -> Result<(), StageError> {
        loop {
            let Some((record, tag)) = self.input.next().await? else {
                tracing::info!(worker = %self.name, "input exhausted, worker stopping");
                return Ok(());
            };

            self.governor.govern().await;

            let processed = self.execute.process(&record).await?;
            if processed.success {
                self.input.acknowledge(tag).await?;
            } else {
                tracing::debug!(worker = %self.name, "record left unacknowledged, awaiting redelivery or retry");
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
