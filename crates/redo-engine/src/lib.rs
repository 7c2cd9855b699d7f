// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! redo-engine: stage roles, the worker loop, the supervisor, and the monitor.

pub mod carrier_input;
pub mod error;
pub mod execute;
pub mod monitor;
pub mod pull;
pub mod roles;
pub mod supervisor;
pub mod worker;

pub use carrier_input::CarrierInput;
pub use error::{FatalError, StageError};
pub use execute::{ApplyExecute, ForwardExecute};
pub use monitor::Monitor;
pub use pull::EnginePullInput;
pub use roles::{Execute, Input, LogOnlyOutput, Output, Processed, PublishOutput};
pub use supervisor::Supervisor;
pub use worker::Worker;
