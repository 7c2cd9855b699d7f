// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn yields_the_seeded_backlog_then_empty_forever() {
    let engine = InMemoryEngine::new("cfg1", vec![RedoRecord::new("R1"), RedoRecord::new("R2")]);
    assert_eq!(engine.pull_redo().await.unwrap(), PullOutcome::Record(RedoRecord::new("R1")));
    assert_eq!(engine.pull_redo().await.unwrap(), PullOutcome::Record(RedoRecord::new("R2")));
    assert_eq!(engine.pull_redo().await.unwrap(), PullOutcome::Empty);
    assert_eq!(engine.pull_redo().await.unwrap(), PullOutcome::Empty);
}

#[tokio::test]
async fn reinit_changes_the_active_config_id() {
    let engine = InMemoryEngine::new("cfg-default", Vec::<RedoRecord>::new());
    assert_eq!(engine.active_config_id().await.unwrap(), "cfg-default");
    engine.reinit("cfg-other").await.unwrap();
    assert_eq!(engine.active_config_id().await.unwrap(), "cfg-other");
    assert_eq!(engine.default_config_id().await.unwrap(), "cfg-default");
}

#[tokio::test]
async fn stats_report_remaining_backlog_size() {
    let engine = InMemoryEngine::new("cfg1", vec![RedoRecord::new("R1")]);
    let stats = engine.stats().await.unwrap();
    assert_eq!(stats["workload"]["redoRecordsRemaining"], 1);
    engine.pull_redo().await.unwrap();
    let stats = engine.stats().await.unwrap();
    assert_eq!(stats["workload"]["redoRecordsRemaining"], 0);
}
