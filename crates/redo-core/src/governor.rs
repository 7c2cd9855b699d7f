// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional user-supplied pre/post hooks around the Execute stage.
//!
//! Both have trivial default implementations. The Governor is shared across
//! all workers (it may coordinate global rate limiting); the Info Filter is
//! constructed per-worker.

use crate::record::InfoEnvelope;
use async_trait::async_trait;

/// Called before every Execute attempt. A real implementation might throttle
/// the pipeline against an external rate limit; the default does nothing.
#[async_trait]
pub trait Governor: Send + Sync {
    async fn govern(&self);
}

/// Transforms (or drops) an info envelope before it reaches an Output.
/// The default implementation passes every envelope through unchanged.
#[async_trait]
pub trait InfoFilter: Send + Sync {
    async fn filter(&self, envelope: InfoEnvelope) -> Option<InfoEnvelope>;
}

/// No-op Governor used whenever the process has no user-supplied one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGovernor;

#[async_trait]
impl Governor for NoopGovernor {
    async fn govern(&self) {}
}

/// Identity InfoFilter used whenever the process has no user-supplied one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughInfoFilter;

#[async_trait]
impl InfoFilter for PassthroughInfoFilter {
    async fn filter(&self, envelope: InfoEnvelope) -> Option<InfoEnvelope> {
        Some(envelope)
    }
}

#[cfg(test)]
#[path = "governor_tests.rs"]
mod tests;
