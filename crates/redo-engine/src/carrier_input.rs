// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `internal-dequeue` and `subscribe-<bus>` Input roles.
//!
//! Both are the same shape: a `TransportAdapter::subscribe` receiver drained
//! one delivery at a time, acknowledged back through the same adapter.

use async_trait::async_trait;
use redo_adapters::{AdapterError, Delivery, TransportAdapter};
use redo_core::{AckTag, RedoRecord};
use tokio::sync::{mpsc, Mutex};

use crate::error::StageError;
use crate::roles::Input;

/// Wraps any [`TransportAdapter`] whose Input role is subscribe-shaped.
///
/// `subscribe` is called once, eagerly, at construction time — `next` only
/// ever drains the channel it returned.
pub struct CarrierInput<T> {
    adapter: T,
    receiver: Mutex<mpsc::Receiver<Delivery>>,
}

impl<T: TransportAdapter> CarrierInput<T> {
    pub async fn new(adapter: T) -> Result<Self, AdapterError> {
        let receiver = adapter.subscribe().await?;
        Ok(Self {
            adapter,
            receiver: Mutex::new(receiver),
        })
    }
}

#[async_trait]
impl<T: TransportAdapter> Input for CarrierInput<T> {
    async fn next(&self) -> Result<Option<(RedoRecord, AckTag)>, StageError> {
        Ok(self.receiver.lock().await.recv().await)
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), StageError> {
        self.adapter.acknowledge(tag).await.map_err(StageError::from)
    }
}

#[cfg(test)]
#[path = "carrier_input_tests.rs"]
mod tests;
