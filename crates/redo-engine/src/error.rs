// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the worker/supervisor/monitor layer.

use thiserror::Error;

/// A condition that ends the process. Every variant maps to an operator-visible
/// log line and exit code 1; there is no recovery above this layer.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("engine gateway is not initialized")]
    EngineNotInitialized,

    #[error("engine reported an unclassified error on {stage}: {message}")]
    UnknownEngineFailure { stage: &'static str, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no stage role is registered for subcommand {0:?}")]
    UnknownSubcommand(String),
}

/// Errors a stage role can return that do not necessarily end the process —
/// the Worker decides whether a `StageError` is fatal by inspecting its kind.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Fatal(#[from] FatalError),

    #[error("transport adapter error: {0}")]
    Adapter(#[from] redo_adapters::AdapterError),

    #[error("engine gateway error: {0}")]
    Gateway(#[from] redo_core::EngineError),
}
