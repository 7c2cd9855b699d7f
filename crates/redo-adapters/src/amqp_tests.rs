// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn config() -> AmqpConfig {
    AmqpConfig {
        uri: "amqp://127.0.0.1:5672/%2f".to_string(),
        exchange: String::new(),
        queue: "redo".to_string(),
        routing_key: "redo".to_string(),
        use_existing_entities: false,
        prefetch_count: 10,
        delivery_mode: 2,
        heartbeat: Duration::from_secs(30),
        reconnect_delay: Duration::from_millis(100),
    }
}

#[tokio::test]
async fn acknowledge_rejects_non_delivery_tag() {
    let adapter = AmqpAdapter::new(config());
    let result = adapter.acknowledge(AckTag::None).await;
    assert!(matches!(result, Err(AdapterError::AcknowledgeFailed { .. })));
}

#[test]
fn new_does_not_eagerly_connect() {
    let adapter = AmqpAdapter::new(config());
    assert_eq!(adapter.config.queue, "redo");
}
