// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static subcommand → pipeline topology registry.
//!
//! Replaces the source's string-keyed dynamic dispatch (§9) with a table
//! match over a closed enum; there is no runtime string lookup once a
//! subcommand has been parsed.

use std::fmt;

/// An external message bus a Transport Adapter can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bus {
    Kafka,
    Rabbitmq,
    Sqs,
    AzureQueue,
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bus::Kafka => "kafka",
            Bus::Rabbitmq => "rabbitmq",
            Bus::Sqs => "sqs",
            Bus::AzureQueue => "azure-queue",
        };
        write!(f, "{s}")
    }
}

/// The Input role a Worker's record source is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    PullFromEngine,
    InternalDequeue,
    Subscribe(Bus),
}

/// The Execute role a Worker applies to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteRole {
    ApplyPlain,
    ApplyWithInfo,
    ForwardTo(Bus),
}

/// The Output role a Worker forwards results/failures to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRole {
    LogOnly,
    Publish(Bus),
}

/// Static description of a pipeline topology, produced once at startup and
/// immutable for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSpec {
    pub input: InputRole,
    pub execute: ExecuteRole,
    pub output: OutputRole,
    /// Whether a dedicated feeder worker drains the engine pull into the
    /// internal queue ahead of the Execute workers (true for every topology
    /// whose Input is `pull-from-engine`).
    pub has_feeder: bool,
}

/// Every subcommand the CLI surface (§6.1) exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    Redo,
    RedoWithInfo(Bus),
    ReadFrom(Bus),
    ReadFromWithInfo(Bus),
    WriteTo(Bus),
    Sleep,
    Version,
}

const PIPELINE_FEEDER: bool = true;

/// Resolve a subcommand to its fixed [`PipelineSpec`]. Returns `None` for the
/// trivial subcommands (`sleep`, `version`) that never build a pipeline.
pub fn lookup_pipeline(subcommand: Subcommand) -> Option<PipelineSpec> {
    match subcommand {
        Subcommand::Redo => Some(PipelineSpec {
            input: InputRole::PullFromEngine,
            execute: ExecuteRole::ApplyPlain,
            output: OutputRole::LogOnly,
            has_feeder: PIPELINE_FEEDER,
        }),
        Subcommand::RedoWithInfo(bus) => Some(PipelineSpec {
            input: InputRole::PullFromEngine,
            execute: ExecuteRole::ApplyWithInfo,
            output: OutputRole::Publish(bus),
            has_feeder: PIPELINE_FEEDER,
        }),
        Subcommand::ReadFrom(bus) => Some(PipelineSpec {
            input: InputRole::Subscribe(bus),
            execute: ExecuteRole::ApplyPlain,
            output: OutputRole::LogOnly,
            has_feeder: false,
        }),
        Subcommand::ReadFromWithInfo(bus) => Some(PipelineSpec {
            input: InputRole::Subscribe(bus),
            execute: ExecuteRole::ApplyWithInfo,
            output: OutputRole::Publish(bus),
            has_feeder: false,
        }),
        Subcommand::WriteTo(bus) => Some(PipelineSpec {
            input: InputRole::PullFromEngine,
            execute: ExecuteRole::ForwardTo(bus),
            output: OutputRole::LogOnly,
            has_feeder: PIPELINE_FEEDER,
        }),
        Subcommand::Sleep | Subcommand::Version => None,
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
