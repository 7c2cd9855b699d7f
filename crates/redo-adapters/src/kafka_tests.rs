// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn config() -> KafkaConfig {
    KafkaConfig {
        brokers: "127.0.0.1:9092".to_string(),
        topic: "redo".to_string(),
        consumer_group: "redoer".to_string(),
    }
}

#[tokio::test]
async fn acknowledge_rejects_non_kafka_offset() {
    let adapter = KafkaAdapter::producer_only(config()).unwrap();
    let result = adapter.acknowledge(AckTag::None).await;
    assert!(matches!(result, Err(AdapterError::AcknowledgeFailed { .. })));
}

#[tokio::test]
async fn subscribe_without_consumer_is_unsupported() {
    let adapter = KafkaAdapter::producer_only(config()).unwrap();
    let result = adapter.subscribe().await;
    assert!(matches!(result, Err(AdapterError::Unsupported { .. })));
}
