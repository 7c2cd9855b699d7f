// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the concrete (Input, Execute, Output) triple a `PipelineSpec`
//! describes, and the worker/feeder task set the Supervisor runs.
//!
//! Bus-specific endpoints are read straight from `AppConfig::bus_endpoint`
//! (§6.2): `host` doubles as the AMQP/SQS connection target or the Azure
//! namespace, `queue` as the queue name or Kafka consumer group, `topic` as
//! the Kafka topic, and `username`/`password` as Azure's SAS key name/value.

use std::sync::Arc;

use redo_adapters::{AmqpAdapter, AmqpConfig, AzureAdapter, AzureConfig, InternalAdapter, KafkaAdapter, KafkaConfig, SqsAdapter, TracedAdapter, TransportAdapter};
use redo_core::{AppConfig, Bus, BusRoleEndpoint, Counters, EngineGateway, ExecuteRole, InputRole, OutputRole, PipelineSpec};
use redo_engine::{ApplyExecute, CarrierInput, EnginePullInput, Execute, ForwardExecute, Input, LogOnlyOutput, Output, PublishOutput, Worker};
use tokio::task::JoinSet;

use crate::error::WiringError;

fn require(field: Option<String>, key: &str) -> Result<String, WiringError> {
    field.ok_or_else(|| WiringError::Configuration(format!("missing required configuration key: {key}")))
}

async fn build_adapter(bus: Bus, endpoint: &BusRoleEndpoint, config: &AppConfig) -> Result<Arc<dyn TransportAdapter>, WiringError> {
    match bus {
        Bus::Rabbitmq => {
            let uri = endpoint
                .connection_string
                .clone()
                .or_else(|| endpoint.host.clone().map(|host| format!("amqp://{host}/%2f")))
                .ok_or_else(|| WiringError::Configuration("missing rabbitmq host or connection_string".into()))?;
            let queue = require(endpoint.queue.clone(), "rabbitmq queue")?;
            let adapter = AmqpAdapter::new(AmqpConfig {
                uri,
                exchange: String::new(),
                routing_key: queue.clone(),
                queue,
                use_existing_entities: config.rabbitmq.use_existing_entities,
                prefetch_count: config.rabbitmq.prefetch_count,
                delivery_mode: config.rabbitmq.delivery_mode,
                heartbeat: config.rabbitmq.heartbeat,
                reconnect_delay: config.rabbitmq.reconnect_delay,
            });
            Ok(Arc::new(TracedAdapter::new("rabbitmq", adapter)))
        }
        Bus::Kafka => {
            let brokers = require(endpoint.host.clone(), "kafka host")?;
            let topic = require(endpoint.topic.clone(), "kafka topic")?;
            let consumer_group = endpoint.queue.clone().unwrap_or_else(|| "redoer".to_string());
            let kafka_config = KafkaConfig { brokers, topic, consumer_group };
            let adapter = KafkaAdapter::with_consumer(kafka_config)?;
            Ok(Arc::new(TracedAdapter::new("kafka", adapter)))
        }
        Bus::Sqs => {
            let queue_url = endpoint
                .connection_string
                .clone()
                .or_else(|| endpoint.host.clone())
                .ok_or_else(|| WiringError::Configuration("missing sqs queue url".into()))?;
            let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_sqs::Client::new(&shared_config);
            let adapter = SqsAdapter::new(client, queue_url);
            Ok(Arc::new(TracedAdapter::new("sqs", adapter)))
        }
        Bus::AzureQueue => {
            let namespace = require(endpoint.host.clone(), "azure-queue host (namespace)")?;
            let queue = require(endpoint.queue.clone(), "azure-queue queue")?;
            let sas_key_name = require(endpoint.username.clone(), "azure-queue username (sas key name)")?;
            let sas_key = require(endpoint.password.clone(), "azure-queue password (sas key)")?;
            let adapter = AzureAdapter::new(AzureConfig { namespace, queue, sas_key_name, sas_key });
            Ok(Arc::new(TracedAdapter::new("azure-queue", adapter)))
        }
    }
}

fn feeder_queue(config: &AppConfig) -> Arc<dyn TransportAdapter> {
    Arc::new(InternalAdapter::new(config.queue_maxsize))
}

fn output_role(role: OutputRole, adapters: Option<(Arc<dyn TransportAdapter>, Arc<dyn TransportAdapter>)>) -> Arc<dyn Output> {
    match (role, adapters) {
        (OutputRole::LogOnly, _) => Arc::new(LogOnlyOutput),
        (OutputRole::Publish(_), Some((info, failure))) => Arc::new(PublishOutput::new(info, failure)),
        (OutputRole::Publish(bus), None) => unreachable!("publish output for {bus} built without adapters"),
    }
}

/// One running pipeline: the task set the Supervisor awaits, plus the feeder
/// task (if any) that must also be spawned alongside the Execute workers.
pub struct Pipeline {
    pub workers: JoinSet<Result<(), redo_engine::StageError>>,
}

/// Assembles every stage named by `spec` and spawns the worker (and feeder,
/// if any) tasks. Adapters are built once and shared across every worker for
/// a given role via `Arc`.
pub async fn build_pipeline(
    spec: PipelineSpec,
    gateway: Arc<EngineGateway>,
    config: &AppConfig,
    counters: Arc<Counters>,
    governor: Arc<dyn redo_core::Governor>,
) -> Result<Pipeline, WiringError> {
    let mut workers = JoinSet::new();

    let output_adapters = match spec.output {
        OutputRole::LogOnly => None,
        OutputRole::Publish(bus) => {
            let info_endpoint = config.bus_endpoint(bus, "info");
            let info_adapter = build_adapter(bus, &info_endpoint, config).await?;
            let failure_endpoint = config.bus_endpoint(bus, "failure");
            let failure_adapter = build_adapter(bus, &failure_endpoint, config).await?;
            Some((info_adapter, failure_adapter))
        }
    };
    let output = output_role(spec.output, output_adapters);

    let execute: Arc<dyn Execute> = match spec.execute {
        ExecuteRole::ApplyPlain => Arc::new(ApplyExecute::new(Arc::clone(&gateway), output, false, Arc::clone(&counters))),
        ExecuteRole::ApplyWithInfo => Arc::new(ApplyExecute::new(Arc::clone(&gateway), output, true, Arc::clone(&counters))),
        ExecuteRole::ForwardTo(bus) => {
            let endpoint = config.bus_endpoint(bus, "redo");
            let adapter = build_adapter(bus, &endpoint, config).await?;
            Arc::new(ForwardExecute::new(adapter, Arc::clone(&counters)))
        }
    };

    match spec.input {
        InputRole::PullFromEngine if spec.has_feeder => {
            let feeder_adapter = feeder_queue(config);
            let feeder_input: Arc<dyn Input> = Arc::new(EnginePullInput::new(
                Arc::clone(&gateway),
                Arc::clone(&counters),
                config.redo_sleep_time,
                config.redo_retry_sleep_time,
                config.redo_retry_limit,
            ));
            let feeder_execute: Arc<dyn Execute> =
                Arc::new(ForwardExecute::new(Arc::clone(&feeder_adapter), Arc::clone(&counters)));
            workers.spawn(Worker::new("feeder", feeder_input, feeder_execute, Arc::new(redo_core::NoopGovernor)).run());

            // `subscribe` is called exactly once for the feeder queue; every
            // execute worker drains the same `Arc<dyn Input>` concurrently.
            let input: Arc<dyn Input> = Arc::new(CarrierInput::new(feeder_adapter).await?);
            for i in 0..config.threads_per_process {
                workers.spawn(Worker::new(format!("execute-{i}"), Arc::clone(&input), Arc::clone(&execute), Arc::clone(&governor)).run());
            }
        }
        InputRole::PullFromEngine => {
            let input: Arc<dyn Input> = Arc::new(EnginePullInput::new(
                Arc::clone(&gateway),
                Arc::clone(&counters),
                config.redo_sleep_time,
                config.redo_retry_sleep_time,
                config.redo_retry_limit,
            ));
            workers.spawn(Worker::new("worker-0", input, Arc::clone(&execute), Arc::clone(&governor)).run());
        }
        InputRole::InternalDequeue => {
            let adapter: Arc<dyn TransportAdapter> = Arc::new(InternalAdapter::new(config.queue_maxsize));
            // `subscribe` is called exactly once; every worker drains the
            // same `Arc<dyn Input>` concurrently (§4.3).
            let input: Arc<dyn Input> = Arc::new(CarrierInput::new(adapter).await?);
            for i in 0..config.threads_per_process {
                workers.spawn(Worker::new(format!("worker-{i}"), Arc::clone(&input), Arc::clone(&execute), Arc::clone(&governor)).run());
            }
        }
        InputRole::Subscribe(bus) => {
            let endpoint = config.bus_endpoint(bus, "redo");
            let adapter = build_adapter(bus, &endpoint, config).await?;
            let input: Arc<dyn Input> = Arc::new(CarrierInput::new(adapter).await?);
            for i in 0..config.threads_per_process {
                workers.spawn(Worker::new(format!("worker-{i}"), Arc::clone(&input), Arc::clone(&execute), Arc::clone(&governor)).run());
            }
        }
    }

    Ok(Pipeline { workers })
}

#[cfg(test)]
#[path = "wiring_tests.rs"]
mod tests;
