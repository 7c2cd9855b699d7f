// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while wiring a pipeline together, before any worker starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Adapter(#[from] redo_adapters::AdapterError),
}
