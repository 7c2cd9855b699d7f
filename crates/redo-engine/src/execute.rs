// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `apply-plain` / `apply-with-info` Execute roles (§4.5) and the
//! `forward-to-<bus>` role used by `write-to-<bus>` pipelines.

use std::sync::Arc;

use async_trait::async_trait;
use redo_adapters::TransportAdapter;
use redo_core::{
    classify_apply_error, Counters, EngineFailureKind, EngineGateway, InfoFilter, PassthroughInfoFilter, RedoRecord,
};

use crate::error::{FatalError, StageError};
use crate::roles::{Execute, Output, Processed};

/// Applies each record against the engine, recovering once from a detected
/// configuration drift and giving up (fatally) on anything else non-transient.
pub struct ApplyExecute<O> {
    gateway: Arc<EngineGateway>,
    output: O,
    with_info: bool,
    counters: Arc<Counters>,
    info_filter: Arc<dyn InfoFilter>,
}

impl<O: Output> ApplyExecute<O> {
    pub fn new(gateway: Arc<EngineGateway>, output: O, with_info: bool, counters: Arc<Counters>) -> Self {
        Self::with_info_filter(gateway, output, with_info, counters, Arc::new(PassthroughInfoFilter))
    }

    pub fn with_info_filter(
        gateway: Arc<EngineGateway>,
        output: O,
        with_info: bool,
        counters: Arc<Counters>,
        info_filter: Arc<dyn InfoFilter>,
    ) -> Self {
        Self {
            gateway,
            output,
            with_info,
            counters,
            info_filter,
        }
    }

    async fn apply_once(&self, record: &RedoRecord) -> Result<Option<String>, redo_core::EngineError> {
        if self.with_info {
            self.gateway.apply_with_info(record).await.map(|envelope| Some(envelope.into_string()))
        } else {
            self.gateway.apply(record).await.map(|()| None)
        }
    }

    async fn on_success(&self, info: Option<String>) -> Result<Processed, StageError> {
        self.counters.inc_processed_redo_records();
        match info {
            Some(text) => {
                let envelope = redo_core::InfoEnvelope::new(text);
                match self.info_filter.filter(envelope).await {
                    Some(envelope) => {
                        self.output.send_info(envelope).await?;
                        self.counters.inc_sent_to_info_queue();
                    }
                    None => tracing::debug!("info envelope dropped by the info filter"),
                }
                Ok(Processed::success())
            }
            None => Ok(Processed::success()),
        }
    }

    async fn give_up(&self, record: &RedoRecord, stage: &'static str, message: String) -> Result<Processed, StageError> {
        self.output.send_failure(record.clone()).await?;
        self.counters.inc_sent_to_failure_queue();
        Err(StageError::Fatal(FatalError::UnknownEngineFailure { stage, message }))
    }
}

#[async_trait]
impl<O: Output> Execute for ApplyExecute<O> {
    async fn process(&self, record: &RedoRecord) -> Result<Processed, StageError> {
        match self.apply_once(record).await {
            Ok(info) => self.on_success(info).await,
            Err(error) => {
                let active = self.gateway.active_config_id().await?;
                let default = self.gateway.default_config_id().await?;
                match classify_apply_error(&error, &active, &default) {
                    EngineFailureKind::DbTransient => {
                        tracing::warn!(error = %error, "apply hit a transient database error, leaving record unacknowledged");
                        Ok(Processed::retry())
                    }
                    EngineFailureKind::ConfigDrift => {
                        tracing::warn!(
                            active, default,
                            "apply failed under a stale config, reinitializing against the default and retrying once"
                        );
                        self.gateway.reinit(&default).await?;
                        match self.apply_once(record).await {
                            Ok(info) => self.on_success(info).await,
                            Err(retry_error) => {
                                self.give_up(record, "apply-after-reinit", retry_error.to_string()).await
                            }
                        }
                    }
                    EngineFailureKind::Fatal | EngineFailureKind::UnknownNonfatal => {
                        self.give_up(record, "apply", error.to_string()).await
                    }
                }
            }
        }
    }
}

/// Republishes each pulled record onto a transport adapter, used by the
/// `write-to-<bus>` subcommands. A publish failure is treated as
/// unknown-nonfatal: it is logged and the record is left unacknowledged
/// rather than crashing the process, since the adapters already retry
/// internally before giving up.
pub struct ForwardExecute<T> {
    adapter: T,
    counters: Arc<Counters>,
}

impl<T: TransportAdapter> ForwardExecute<T> {
    pub fn new(adapter: T, counters: Arc<Counters>) -> Self {
        Self { adapter, counters }
    }
}

#[async_trait]
impl<T: TransportAdapter> Execute for ForwardExecute<T> {
    async fn process(&self, record: &RedoRecord) -> Result<Processed, StageError> {
        match self.adapter.publish(record).await {
            Ok(()) => {
                self.counters.inc_sent_to_redo_queue();
                Ok(Processed::success())
            }
            Err(error) => {
                tracing::warn!(error = %error, "forward publish failed, leaving record unacknowledged");
                Ok(Processed::retry())
            }
        }
    }
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;
