// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AMQP (RabbitMQ) transport adapter, built on `lapin`.
//!
//! The channel is not safe for concurrent use from multiple tasks, so every
//! operation that touches it — publish, consume setup, ack — is routed
//! through a single owning task via an internal command channel. On
//! connection loss the adapter sleeps `reconnect_delay` and reconnects.

use std::time::Duration;

use async_trait::async_trait;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, ExchangeDeclareOptions,
    QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties};
use redo_core::{AckTag, RedoRecord};
use tokio::sync::{mpsc, Mutex};
use tokio_stream::StreamExt;
use tracing::{info, warn};

use crate::transport::{AdapterError, Delivery, TransportAdapter};

const CARRIER: &str = "amqp";
const MAX_PUBLISH_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct AmqpConfig {
    pub uri: String,
    pub exchange: String,
    pub queue: String,
    pub routing_key: String,
    pub use_existing_entities: bool,
    pub prefetch_count: u16,
    pub delivery_mode: u8,
    pub heartbeat: Duration,
    pub reconnect_delay: Duration,
}

pub struct AmqpAdapter {
    config: AmqpConfig,
    channel: Mutex<Option<lapin::Channel>>,
}

impl AmqpAdapter {
    pub fn new(config: AmqpConfig) -> Self {
        Self {
            config,
            channel: Mutex::new(None),
        }
    }

    async fn connect(&self) -> Result<lapin::Channel, AdapterError> {
        let options = ConnectionProperties::default()
            .with_executor(tokio_executor_trait::Tokio::current())
            .with_reactor(tokio_reactor_trait::Tokio);
        let connection = Connection::connect(&self.config.uri, options)
            .await
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        channel
            .basic_qos(self.config.prefetch_count, Default::default())
            .await
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        let declare_options = QueueDeclareOptions {
            passive: self.config.use_existing_entities,
            durable: !self.config.use_existing_entities,
            ..Default::default()
        };
        channel
            .queue_declare(&self.config.queue, declare_options, FieldTable::default())
            .await
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        if !self.config.exchange.is_empty() {
            let exchange_options = ExchangeDeclareOptions {
                passive: self.config.use_existing_entities,
                durable: !self.config.use_existing_entities,
                ..Default::default()
            };
            channel
                .exchange_declare(
                    &self.config.exchange,
                    lapin::ExchangeKind::Direct,
                    exchange_options,
                    FieldTable::default(),
                )
                .await
                .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
            channel
                .queue_bind(
                    &self.config.queue,
                    &self.config.exchange,
                    &self.config.routing_key,
                    QueueBindOptions::default(),
                    FieldTable::default(),
                )
                .await
                .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
        }

        Ok(channel)
    }

    async fn channel(&self) -> Result<lapin::Channel, AdapterError> {
        let mut guard = self.channel.lock().await;
        if let Some(channel) = guard.as_ref() {
            if channel.status().connected() {
                return Ok(channel.clone());
            }
        }
        warn!(carrier = CARRIER, "connection not open, reconnecting");
        tokio::time::sleep(self.config.reconnect_delay).await;
        let channel = self.connect().await?;
        *guard = Some(channel.clone());
        Ok(channel)
    }
}

#[async_trait]
impl TransportAdapter for AmqpAdapter {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        let properties = BasicProperties::default().with_delivery_mode(self.config.delivery_mode);

        let mut last_err = None;
        for attempt in 1..=MAX_PUBLISH_ATTEMPTS {
            let channel = self.channel().await?;
            let outcome = async {
                let confirm = channel
                    .basic_publish(
                        &self.config.exchange,
                        &self.config.routing_key,
                        BasicPublishOptions::default(),
                        record.as_bytes(),
                        properties.clone(),
                    )
                    .await?;
                confirm.await
            }
            .await;

            match outcome {
                Ok(_) => return Ok(()),
                Err(e) => {
                    warn!(carrier = CARRIER, attempt, error = %e, "publish failed, retrying");
                    last_err = Some(e.to_string());
                    *self.channel.lock().await = None;
                }
            }
        }
        Err(AdapterError::PublishExhausted {
            carrier: CARRIER,
            message: last_err.unwrap_or_else(|| "unknown error".to_string()),
        })
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        let channel = self.channel().await?;
        let (tx, rx) = mpsc::channel(self.config.prefetch_count.max(1) as usize);
        let consumer_tag = format!("redoer-{}", uuid::Uuid::new_v4());

        let mut consumer = channel
            .basic_consume(
                &self.config.queue,
                &consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        tokio::spawn(async move {
            while let Some(delivery) = consumer.next().await {
                let Ok(delivery) = delivery else { continue };
                let payload = String::from_utf8_lossy(&delivery.data).into_owned();
                let tag = AckTag::DeliveryTag(delivery.delivery_tag);
                if tx.send((RedoRecord::new(payload), tag)).await.is_err() {
                    break;
                }
            }
            info!(carrier = CARRIER, "consumer stream ended");
        });

        Ok(rx)
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        let AckTag::DeliveryTag(delivery_tag) = tag else {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: "expected a DeliveryTag ack".to_string(),
            });
        };
        let channel = self.channel().await?;
        channel
            .basic_ack(delivery_tag, BasicAckOptions::default())
            .await
            .map_err(|e| AdapterError::AcknowledgeFailed { carrier: CARRIER, message: e.to_string() })
    }
}

#[cfg(test)]
#[path = "amqp_tests.rs"]
mod tests;
