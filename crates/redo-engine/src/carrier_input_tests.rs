// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use redo_adapters::InternalAdapter;
use redo_core::RedoRecord;

use super::*;

#[tokio::test]
async fn drains_records_published_onto_the_wrapped_adapter() {
    let adapter = InternalAdapter::new(4);
    adapter.publish(&RedoRecord::new("R1")).await.unwrap();
    adapter.publish(&RedoRecord::new("R2")).await.unwrap();

    let input = CarrierInput::new(adapter).await.unwrap();
    let (first, _) = input.next().await.unwrap().unwrap();
    let (second, _) = input.next().await.unwrap().unwrap();
    assert_eq!(first.as_str(), "R1");
    assert_eq!(second.as_str(), "R2");
}

#[tokio::test]
async fn acknowledge_delegates_to_the_wrapped_adapter() {
    let adapter = InternalAdapter::new(1);
    let input = CarrierInput::new(adapter).await.unwrap();
    input.acknowledge(AckTag::None).await.unwrap();
}
