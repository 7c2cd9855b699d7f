// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};

fn test_client() -> Client {
    let config = aws_sdk_sqs::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .build();
    Client::from_conf(config)
}

#[tokio::test]
async fn acknowledge_rejects_non_receipt_handle() {
    let adapter = SqsAdapter::new(test_client(), "https://example.invalid/queue".to_string());
    let result = adapter.acknowledge(AckTag::None).await;
    assert!(matches!(result, Err(AdapterError::AcknowledgeFailed { .. })));
}
