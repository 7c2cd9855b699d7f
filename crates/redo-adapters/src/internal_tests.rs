// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn publish_then_subscribe_delivers_in_order() {
    let adapter = InternalAdapter::new(4);
    adapter.publish(&RedoRecord::new("R1")).await.unwrap();
    adapter.publish(&RedoRecord::new("R2")).await.unwrap();

    let mut rx = adapter.subscribe().await.unwrap();
    let (rec1, tag1) = rx.recv().await.unwrap();
    let (rec2, _tag2) = rx.recv().await.unwrap();

    assert_eq!(rec1.as_str(), "R1");
    assert_eq!(rec2.as_str(), "R2");
    assert_eq!(tag1, AckTag::None);
}

#[tokio::test]
async fn subscribe_can_only_be_taken_once() {
    let adapter = InternalAdapter::new(4);
    let _rx = adapter.subscribe().await.unwrap();
    let second = adapter.subscribe().await;
    assert!(second.is_err());
}

#[tokio::test]
async fn publish_blocks_when_queue_is_full() {
    let adapter = InternalAdapter::new(2);
    adapter.publish(&RedoRecord::new("R1")).await.unwrap();
    adapter.publish(&RedoRecord::new("R2")).await.unwrap();

    let third = tokio::time::timeout(
        Duration::from_millis(50),
        adapter.publish(&RedoRecord::new("R3")),
    )
    .await;
    assert!(third.is_err(), "publish should have blocked on a full queue");
}

#[tokio::test]
async fn acknowledge_is_always_a_no_op() {
    let adapter = InternalAdapter::new(1);
    adapter.acknowledge(AckTag::None).await.unwrap();
}
