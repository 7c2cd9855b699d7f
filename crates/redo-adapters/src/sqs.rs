// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQS transport adapter, built on `aws-sdk-sqs`.
//!
//! `subscribe` long-polls (wait time 20s, one message per call) in a
//! background task. `acknowledge` deletes the message by its receipt
//! handle — SQS has no separate commit step, so a crash between Execute
//! success and `acknowledge` simply redelivers the record after the
//! visibility timeout expires.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use redo_core::{AckTag, RedoRecord};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::transport::{AdapterError, Delivery, TransportAdapter};

const CARRIER: &str = "sqs";
const LONG_POLL_SECS: i32 = 20;

pub struct SqsAdapter {
    client: Client,
    queue_url: String,
}

impl SqsAdapter {
    pub fn new(client: Client, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait]
impl TransportAdapter for SqsAdapter {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(record.as_str())
            .send()
            .await
            .map_err(|e| AdapterError::PublishExhausted { carrier: CARRIER, message: e.to_string() })
            .map(|_| ())
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        let (tx, rx) = mpsc::channel(16);
        let client = self.client.clone();
        let queue_url = self.queue_url.clone();

        tokio::spawn(async move {
            loop {
                let received = client
                    .receive_message()
                    .queue_url(&queue_url)
                    .max_number_of_messages(1)
                    .wait_time_seconds(LONG_POLL_SECS)
                    .send()
                    .await;

                let messages = match received {
                    Ok(output) => output.messages.unwrap_or_default(),
                    Err(e) => {
                        warn!(carrier = CARRIER, error = %e, "receive_message failed");
                        continue;
                    }
                };

                for message in messages {
                    let (Some(body), Some(receipt_handle)) = (message.body, message.receipt_handle)
                    else {
                        continue;
                    };
                    let tag = AckTag::ReceiptHandle(receipt_handle);
                    if tx.send((RedoRecord::new(body), tag)).await.is_err() {
                        info!(carrier = CARRIER, "receiver dropped, stopping poll loop");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        let AckTag::ReceiptHandle(receipt_handle) = tag else {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: "expected a ReceiptHandle ack".to_string(),
            });
        };
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| AdapterError::AcknowledgeFailed { carrier: CARRIER, message: e.to_string() })
            .map(|_| ())
    }
}

#[cfg(test)]
#[path = "sqs_tests.rs"]
mod tests;
