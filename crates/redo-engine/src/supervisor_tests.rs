// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use redo_core::{Counters, EngineError, EngineHandle, InfoEnvelope, PullOutcome, RedoRecord};

use super::*;

struct NoopHandle;

#[async_trait]
impl EngineHandle for NoopHandle {
    async fn pull_redo(&self) -> Result<PullOutcome, EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn apply(&self, _record: &RedoRecord) -> Result<(), EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn apply_with_info(&self, _record: &RedoRecord) -> Result<InfoEnvelope, EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn active_config_id(&self) -> Result<String, EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn default_config_id(&self) -> Result<String, EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn reinit(&self, _config_id: &str) -> Result<(), EngineError> {
        unreachable!("not exercised by supervisor tests")
    }
    async fn stats(&self) -> Result<serde_json::Value, EngineError> {
        Ok(serde_json::json!({}))
    }
}

fn monitor(gateway: Arc<EngineGateway>) -> Monitor {
    Monitor::new(
        gateway,
        Arc::new(Counters::new()),
        std::time::Duration::from_secs(3600),
        std::time::Duration::from_secs(3600),
        false,
        false,
    )
}

#[tokio::test]
async fn returns_ok_once_every_worker_finishes_cleanly() {
    let gateway = Arc::new(EngineGateway::new(Box::new(NoopHandle)));
    let supervisor = Supervisor::new(Arc::clone(&gateway));

    let mut workers = JoinSet::new();
    workers.spawn(async { Ok(()) });
    workers.spawn(async { Ok(()) });

    let result = supervisor.run(workers, monitor(gateway)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn propagates_the_first_fatal_worker_error() {
    let gateway = Arc::new(EngineGateway::new(Box::new(NoopHandle)));
    let supervisor = Supervisor::new(Arc::clone(&gateway));

    let mut workers = JoinSet::new();
    workers.spawn(async { Err(StageError::Fatal(FatalError::EngineNotInitialized)) });
    workers.spawn(async {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(())
    });

    let result = supervisor.run(workers, monitor(gateway)).await;
    assert!(matches!(result, Err(FatalError::EngineNotInitialized)));
}
