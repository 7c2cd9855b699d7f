// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity in-memory FIFO carrier.
//!
//! Used both as the internal queue between the engine-pull feeder and the
//! Execute workers, and as a carrier in its own right for `internal-dequeue`
//! Input roles. `publish` blocks (via the bounded channel) when full;
//! `acknowledge` is a no-op; no record survives a process crash.

use async_trait::async_trait;
use redo_core::{AckTag, RedoRecord};
use tokio::sync::{mpsc, Mutex};

use crate::transport::{AdapterError, Delivery, TransportAdapter};

/// An in-memory bounded-capacity carrier.
///
/// Cloning shares the same underlying channel — every clone publishes into
/// and, if `subscribe` has not yet been called, could drain from the same
/// queue. In practice one clone is given to each producing worker and a
/// single clone's `subscribe` is taken by exactly one consumer side.
pub struct InternalAdapter {
    sender: mpsc::Sender<Delivery>,
    receiver: Mutex<Option<mpsc::Receiver<Delivery>>>,
}

impl InternalAdapter {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }
}

#[async_trait]
impl TransportAdapter for InternalAdapter {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        self.sender
            .send((record.clone(), AckTag::None))
            .await
            .map_err(|_| AdapterError::PublishExhausted {
                carrier: "internal",
                message: "queue closed".to_string(),
            })
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        self.receiver
            .lock()
            .await
            .take()
            .ok_or(AdapterError::Unsupported {
                operation: "subscribe (already taken)",
            })
    }

    async fn acknowledge(&self, _tag: AckTag) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "internal_tests.rs"]
mod tests;
