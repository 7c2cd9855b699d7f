// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! redo-adapters: the uniform publish/subscribe/acknowledge surface over
//! every supported carrier (internal queue, AMQP, Kafka, SQS, Azure Service Bus).

pub mod amqp;
pub mod azure;
pub mod internal;
pub mod kafka;
pub mod sqs;
mod traced;
pub mod transport;

pub use amqp::AmqpAdapter;
pub use azure::AzureAdapter;
pub use internal::InternalAdapter;
pub use kafka::KafkaAdapter;
pub use sqs::SqsAdapter;
pub use traced::TracedAdapter;
pub use transport::{AdapterError, Delivery, TransportAdapter};
