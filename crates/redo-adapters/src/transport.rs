// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three-operation duck-typed adapter API (§4.2), formalized as a trait.
//!
//! Not every adapter implements every operation meaningfully — `Internal`
//! has a no-op `acknowledge`, and a carrier an Output-only role binds to
//! never calls `subscribe`. Unsupported operations return
//! [`AdapterError::Unsupported`] rather than panicking.

use std::sync::Arc;

use async_trait::async_trait;
use redo_core::{AckTag, RedoRecord};
use thiserror::Error;
use tokio::sync::mpsc;

/// A single delivery handed from a subscribing adapter to its Worker.
pub type Delivery = (RedoRecord, AckTag);

/// Errors any Transport Adapter can raise.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{carrier} connect failed: {message}")]
    Connect { carrier: &'static str, message: String },
    #[error("{carrier} publish failed after retries: {message}")]
    PublishExhausted { carrier: &'static str, message: String },
    #[error("{carrier} acknowledge failed: {message}")]
    AcknowledgeFailed { carrier: &'static str, message: String },
    #[error("{operation} is not supported by this adapter")]
    Unsupported { operation: &'static str },
}

/// Uniform publish/subscribe/acknowledge surface every carrier implements a
/// subset of.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Publish a record. Must not lose the record on a transient failure —
    /// implementations retry internally with backoff before giving up.
    async fn publish(&self, _record: &RedoRecord) -> Result<(), AdapterError> {
        Err(AdapterError::Unsupported { operation: "publish" })
    }

    /// Run forever, delivering `(record, AckTag)` pairs on the returned
    /// channel. The subscribing task owns reconnection; callers just drain
    /// the receiver until it closes.
    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        Err(AdapterError::Unsupported { operation: "subscribe" })
    }

    /// Idempotent finalization of a single delivery.
    async fn acknowledge(&self, _tag: AckTag) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// Lets an `Arc<dyn TransportAdapter>` stand in for a concrete adapter — the
/// daemon picks a concrete carrier per subcommand and erases it to this
/// before handing it to an Execute or Input role.
#[async_trait]
impl TransportAdapter for Arc<dyn TransportAdapter> {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        (**self).publish(record).await
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        (**self).subscribe().await
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        (**self).acknowledge(tag).await
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
