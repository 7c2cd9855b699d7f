// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clap`-derived CLI surface (§6.1, §6.2, §4.13). Each subcommand resolves
//! to a fixed `redo_core::Subcommand`; there is no dynamic string dispatch
//! beyond this single match.

use clap::{Args, Parser, Subcommand as ClapSubcommand};
use redo_core::{Bus, RawOverrides, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "redoer", version, about = "Drains an entity-resolution engine's redo backlog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Every configuration key in §6.2, exposed both as a long flag and a
/// `REDOER_*` environment variable. Unset fields fall through to the
/// environment, then the hardcoded default, in `redo_core::resolve_config`.
#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    #[arg(long, env = "REDOER_THREADS_PER_PROCESS")]
    pub threads_per_process: Option<u32>,
    #[arg(long, env = "REDOER_QUEUE_MAXSIZE")]
    pub queue_maxsize: Option<usize>,
    #[arg(long, env = "REDOER_REDO_SLEEP_TIME_IN_SECONDS")]
    pub redo_sleep_time_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_REDO_RETRY_SLEEP_TIME_IN_SECONDS")]
    pub redo_retry_sleep_time_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_REDO_RETRY_LIMIT")]
    pub redo_retry_limit: Option<u32>,
    #[arg(long, env = "REDOER_MONITORING_PERIOD_IN_SECONDS")]
    pub monitoring_period_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_LOG_LICENSE_PERIOD_IN_SECONDS")]
    pub log_license_period_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_EXPIRATION_WARNING_IN_DAYS")]
    pub expiration_warning_in_days: Option<u32>,
    #[arg(long, env = "REDOER_DELAY_IN_SECONDS")]
    pub delay_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_EXIT_ON_THREAD_TERMINATION")]
    pub exit_on_thread_termination: Option<bool>,
    #[arg(long, env = "REDOER_RUN_GDB")]
    pub run_gdb: Option<bool>,
    #[arg(long, env = "REDOER_RABBITMQ_PREFETCH_COUNT")]
    pub rabbitmq_prefetch_count: Option<u32>,
    #[arg(long, env = "REDOER_RABBITMQ_DELIVERY_MODE")]
    pub rabbitmq_delivery_mode: Option<u8>,
    #[arg(long, env = "REDOER_RABBITMQ_HEARTBEAT_IN_SECONDS")]
    pub rabbitmq_heartbeat_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_RABBITMQ_RECONNECT_DELAY_IN_SECONDS")]
    pub rabbitmq_reconnect_delay_in_seconds: Option<u64>,
    #[arg(long, env = "REDOER_RABBITMQ_USE_EXISTING_ENTITIES")]
    pub rabbitmq_use_existing_entities: Option<bool>,
    #[arg(long, env = "REDOER_ENGINE_CONFIGURATION_JSON")]
    pub engine_configuration_json: Option<String>,
}

impl From<OverrideArgs> for RawOverrides {
    fn from(a: OverrideArgs) -> Self {
        RawOverrides {
            threads_per_process: a.threads_per_process,
            queue_maxsize: a.queue_maxsize,
            redo_sleep_time_in_seconds: a.redo_sleep_time_in_seconds,
            redo_retry_sleep_time_in_seconds: a.redo_retry_sleep_time_in_seconds,
            redo_retry_limit: a.redo_retry_limit,
            monitoring_period_in_seconds: a.monitoring_period_in_seconds,
            log_license_period_in_seconds: a.log_license_period_in_seconds,
            expiration_warning_in_days: a.expiration_warning_in_days,
            delay_in_seconds: a.delay_in_seconds,
            exit_on_thread_termination: a.exit_on_thread_termination,
            run_gdb: a.run_gdb,
            rabbitmq_prefetch_count: a.rabbitmq_prefetch_count,
            rabbitmq_delivery_mode: a.rabbitmq_delivery_mode,
            rabbitmq_heartbeat_in_seconds: a.rabbitmq_heartbeat_in_seconds,
            rabbitmq_reconnect_delay_in_seconds: a.rabbitmq_reconnect_delay_in_seconds,
            rabbitmq_use_existing_entities: a.rabbitmq_use_existing_entities,
            engine_configuration_json: a.engine_configuration_json,
        }
    }
}

#[derive(Debug, ClapSubcommand)]
pub enum Command {
    Redo(OverrideArgs),
    #[command(name = "redo-withinfo-kafka")]
    RedoWithinfoKafka(OverrideArgs),
    #[command(name = "redo-withinfo-rabbitmq")]
    RedoWithinfoRabbitmq(OverrideArgs),
    #[command(name = "redo-withinfo-sqs")]
    RedoWithinfoSqs(OverrideArgs),
    #[command(name = "redo-withinfo-azure-queue")]
    RedoWithinfoAzureQueue(OverrideArgs),
    #[command(name = "read-from-kafka")]
    ReadFromKafka(OverrideArgs),
    #[command(name = "read-from-kafka-withinfo")]
    ReadFromKafkaWithinfo(OverrideArgs),
    #[command(name = "read-from-rabbitmq")]
    ReadFromRabbitmq(OverrideArgs),
    #[command(name = "read-from-rabbitmq-withinfo")]
    ReadFromRabbitmqWithinfo(OverrideArgs),
    #[command(name = "read-from-sqs")]
    ReadFromSqs(OverrideArgs),
    #[command(name = "read-from-sqs-withinfo")]
    ReadFromSqsWithinfo(OverrideArgs),
    #[command(name = "read-from-azure-queue")]
    ReadFromAzureQueue(OverrideArgs),
    #[command(name = "read-from-azure-queue-withinfo")]
    ReadFromAzureQueueWithinfo(OverrideArgs),
    #[command(name = "write-to-kafka")]
    WriteToKafka(OverrideArgs),
    #[command(name = "write-to-rabbitmq")]
    WriteToRabbitmq(OverrideArgs),
    #[command(name = "write-to-sqs")]
    WriteToSqs(OverrideArgs),
    #[command(name = "write-to-azure-queue")]
    WriteToAzureQueue(OverrideArgs),
    /// Sleep forever without starting a pipeline — used by orchestration
    /// probes that only want to confirm the image runs.
    Sleep,
    /// Print the version and exit.
    Version,
}

impl Command {
    /// The fixed pipeline topology this invocation selects, or `None` for
    /// `sleep`/`version`, which never build one.
    pub fn subcommand(&self) -> Subcommand {
        match self {
            Command::Redo(_) => Subcommand::Redo,
            Command::RedoWithinfoKafka(_) => Subcommand::RedoWithInfo(Bus::Kafka),
            Command::RedoWithinfoRabbitmq(_) => Subcommand::RedoWithInfo(Bus::Rabbitmq),
            Command::RedoWithinfoSqs(_) => Subcommand::RedoWithInfo(Bus::Sqs),
            Command::RedoWithinfoAzureQueue(_) => Subcommand::RedoWithInfo(Bus::AzureQueue),
            Command::ReadFromKafka(_) => Subcommand::ReadFrom(Bus::Kafka),
            Command::ReadFromKafkaWithinfo(_) => Subcommand::ReadFromWithInfo(Bus::Kafka),
            Command::ReadFromRabbitmq(_) => Subcommand::ReadFrom(Bus::Rabbitmq),
            Command::ReadFromRabbitmqWithinfo(_) => Subcommand::ReadFromWithInfo(Bus::Rabbitmq),
            Command::ReadFromSqs(_) => Subcommand::ReadFrom(Bus::Sqs),
            Command::ReadFromSqsWithinfo(_) => Subcommand::ReadFromWithInfo(Bus::Sqs),
            Command::ReadFromAzureQueue(_) => Subcommand::ReadFrom(Bus::AzureQueue),
            Command::ReadFromAzureQueueWithinfo(_) => Subcommand::ReadFromWithInfo(Bus::AzureQueue),
            Command::WriteToKafka(_) => Subcommand::WriteTo(Bus::Kafka),
            Command::WriteToRabbitmq(_) => Subcommand::WriteTo(Bus::Rabbitmq),
            Command::WriteToSqs(_) => Subcommand::WriteTo(Bus::Sqs),
            Command::WriteToAzureQueue(_) => Subcommand::WriteTo(Bus::AzureQueue),
            Command::Sleep => Subcommand::Sleep,
            Command::Version => Subcommand::Version,
        }
    }

    pub fn overrides(self) -> RawOverrides {
        match self {
            Command::Redo(a)
            | Command::RedoWithinfoKafka(a)
            | Command::RedoWithinfoRabbitmq(a)
            | Command::RedoWithinfoSqs(a)
            | Command::RedoWithinfoAzureQueue(a)
            | Command::ReadFromKafka(a)
            | Command::ReadFromKafkaWithinfo(a)
            | Command::ReadFromRabbitmq(a)
            | Command::ReadFromRabbitmqWithinfo(a)
            | Command::ReadFromSqs(a)
            | Command::ReadFromSqsWithinfo(a)
            | Command::ReadFromAzureQueue(a)
            | Command::ReadFromAzureQueueWithinfo(a)
            | Command::WriteToKafka(a)
            | Command::WriteToRabbitmq(a)
            | Command::WriteToSqs(a)
            | Command::WriteToAzureQueue(a) => a.into(),
            Command::Sleep | Command::Version => RawOverrides::default(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
