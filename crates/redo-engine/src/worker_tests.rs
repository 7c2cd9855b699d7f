// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use redo_core::{AckTag, NoopGovernor, RedoRecord};

use super::*;

struct FakeInput {
    records: StdMutex<VecDeque<(RedoRecord, AckTag)>>,
    acknowledged: StdMutex<Vec<AckTag>>,
}

impl FakeInput {
    fn new(records: Vec<(RedoRecord, AckTag)>) -> Self {
        Self {
            records: StdMutex::new(records.into()),
            acknowledged: StdMutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Input for FakeInput {
    async fn next(&self) -> Result<Option<(RedoRecord, AckTag)>, StageError> {
        Ok(self.records.lock().unwrap().pop_front())
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), StageError> {
        self.acknowledged.lock().unwrap().push(tag);
        Ok(())
    }
}

struct AlwaysSucceeds;

#[async_trait]
impl Execute for AlwaysSucceeds {
    async fn process(&self, _record: &RedoRecord) -> Result<crate::roles::Processed, StageError> {
        Ok(crate::roles::Processed::success())
    }
}

struct AlwaysRetries;

#[async_trait]
impl Execute for AlwaysRetries {
    async fn process(&self, _record: &RedoRecord) -> Result<crate::roles::Processed, StageError> {
        Ok(crate::roles::Processed::retry())
    }
}

#[tokio::test]
async fn acknowledges_every_successfully_processed_record() {
    let input = Arc::new(FakeInput::new(vec![
        (RedoRecord::new("R1"), AckTag::DeliveryTag(1)),
        (RedoRecord::new("R2"), AckTag::DeliveryTag(2)),
    ]));
    let worker = Worker::new("w", Arc::clone(&input), Arc::new(AlwaysSucceeds), Arc::new(NoopGovernor));
    worker.run().await.unwrap();
    assert_eq!(
        input.acknowledged.lock().unwrap().as_slice(),
        &[AckTag::DeliveryTag(1), AckTag::DeliveryTag(2)]
    );
}

#[tokio::test]
async fn leaves_unsuccessful_records_unacknowledged() {
    let input = Arc::new(FakeInput::new(vec![(RedoRecord::new("R1"), AckTag::DeliveryTag(1))]));
    let worker = Worker::new("w", Arc::clone(&input), Arc::new(AlwaysRetries), Arc::new(NoopGovernor));
    worker.run().await.unwrap();
    assert!(input.acknowledged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stops_once_the_input_is_exhausted() {
    let input = Arc::new(FakeInput::new(vec![]));
    let worker = Worker::new("w", input, Arc::new(AlwaysSucceeds), Arc::new(NoopGovernor));
    worker.run().await.unwrap();
}
