// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability across carriers.

use async_trait::async_trait;
use redo_core::{AckTag, RedoRecord};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::transport::{AdapterError, Delivery, TransportAdapter};

/// Wrapper that adds tracing spans to any `TransportAdapter`.
#[derive(Clone)]
pub struct TracedAdapter<T> {
    carrier: &'static str,
    inner: T,
}

impl<T> TracedAdapter<T> {
    pub fn new(carrier: &'static str, inner: T) -> Self {
        Self { carrier, inner }
    }
}

#[async_trait]
impl<T: TransportAdapter> TransportAdapter for TracedAdapter<T> {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        let span = tracing::info_span!("adapter.publish", carrier = self.carrier, record_len = record.len());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.publish(record).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "published"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "publish failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        tracing::info!(carrier = self.carrier, "subscribing");
        let result = self.inner.subscribe().await;
        if let Err(ref e) = result {
            tracing::error!(carrier = self.carrier, error = %e, "subscribe failed");
        }
        result
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        let result = self.inner.acknowledge(tag).await;
        tracing::trace!(carrier = self.carrier, ok = result.is_ok(), "acknowledge");
        if let Err(ref e) = result {
            tracing::warn!(carrier = self.carrier, error = %e, "acknowledge failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
