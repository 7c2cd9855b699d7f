// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! redo-core: data model, configuration, and engine contract for the redo daemon.

pub mod ack;
pub mod classify;
pub mod config;
pub mod counters;
pub mod fake;
pub mod gateway;
pub mod governor;
pub mod pipeline;
pub mod record;

pub use ack::AckTag;
pub use fake::InMemoryEngine;
pub use classify::{classify_apply_error, classify_pull_error, EngineFailureKind};
pub use config::{
    is_sensitive_key, resolve_config, AppConfig, BusRoleEndpoint, RabbitmqConfig, RawOverrides,
};
pub use counters::{Counters, CountersSnapshot};
pub use gateway::{EngineError, EngineGateway, EngineHandle, EngineStatus, PullOutcome};
pub use governor::{Governor, InfoFilter, NoopGovernor, PassthroughInfoFilter};
pub use pipeline::{
    lookup_pipeline, Bus, ExecuteRole, InputRole, OutputRole, PipelineSpec, Subcommand,
};
pub use record::{InfoEnvelope, RedoRecord};
