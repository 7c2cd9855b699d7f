// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kafka transport adapter, built on `rdkafka`.
//!
//! Producer for publish; a named-group consumer for subscribe with
//! `enable.auto.commit=false` and `auto.offset.reset=earliest`. The offset
//! is committed only after the Worker's Execute reports success, via
//! [`KafkaAdapter::acknowledge`] — a failure before commit is acceptable,
//! since Kafka redelivers from the last committed offset.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::{Message, TopicPartitionList};
use redo_core::{AckTag, RedoRecord};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::transport::{AdapterError, Delivery, TransportAdapter};

const CARRIER: &str = "kafka";

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
    pub consumer_group: String,
}

pub struct KafkaAdapter {
    config: KafkaConfig,
    producer: FutureProducer,
    consumer: Option<StreamConsumer>,
}

impl KafkaAdapter {
    pub fn producer_only(config: KafkaConfig) -> Result<Self, AdapterError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .create()
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
        Ok(Self { config, producer, consumer: None })
    }

    pub fn with_consumer(config: KafkaConfig) -> Result<Self, AdapterError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .create()
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.consumer_group)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;
        consumer
            .subscribe(&[config.topic.as_str()])
            .map_err(|e| AdapterError::Connect { carrier: CARRIER, message: e.to_string() })?;

        Ok(Self { config, producer, consumer: Some(consumer) })
    }
}

#[async_trait]
impl TransportAdapter for KafkaAdapter {
    async fn publish(&self, record: &RedoRecord) -> Result<(), AdapterError> {
        let payload = FutureRecord::to(&self.config.topic).payload(record.as_str()).key("");
        self.producer
            .send(payload, Duration::from_secs(5))
            .await
            .map_err(|(e, _)| AdapterError::PublishExhausted {
                carrier: CARRIER,
                message: e.to_string(),
            })
            .map(|_| ())
    }

    async fn subscribe(&self) -> Result<mpsc::Receiver<Delivery>, AdapterError> {
        let Some(consumer) = self.consumer.clone() else {
            return Err(AdapterError::Unsupported { operation: "subscribe (no consumer configured)" });
        };
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            loop {
                match consumer.recv().await {
                    Ok(message) => {
                        let Some(payload) = message.payload() else { continue };
                        let text = String::from_utf8_lossy(payload).into_owned();
                        let tag = AckTag::KafkaOffset {
                            topic: message.topic().to_string(),
                            partition: message.partition(),
                            offset: message.offset(),
                        };
                        if tx.send((RedoRecord::new(text), tag)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(carrier = CARRIER, error = %e, "consumer recv error");
                    }
                }
            }
            info!(carrier = CARRIER, "consumer stream ended");
        });

        Ok(rx)
    }

    async fn acknowledge(&self, tag: AckTag) -> Result<(), AdapterError> {
        let AckTag::KafkaOffset { topic, partition, offset } = tag else {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: "expected a KafkaOffset ack".to_string(),
            });
        };
        let Some(consumer) = self.consumer.as_ref() else {
            return Err(AdapterError::AcknowledgeFailed {
                carrier: CARRIER,
                message: "no consumer configured".to_string(),
            });
        };
        let mut tpl = TopicPartitionList::new();
        tpl.add_partition_offset(&topic, partition, rdkafka::Offset::Offset(offset + 1))
            .map_err(|e| AdapterError::AcknowledgeFailed { carrier: CARRIER, message: e.to_string() })?;
        consumer
            .commit(&tpl, CommitMode::Async)
            .map_err(|e| AdapterError::AcknowledgeFailed { carrier: CARRIER, message: e.to_string() })
    }
}

#[cfg(test)]
#[path = "kafka_tests.rs"]
mod tests;
