// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The periodic Monitor (§4.8): uptime, worker liveness, counter deltas,
//! engine stats passthrough, a licence-placeholder banner, and an optional
//! gdb stack dump.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use redo_core::{Counters, EngineGateway};
use regex::Regex;

fn gdb_frame_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".+ in .+:\d+$").expect("static gdb frame pattern is valid"))
}

/// Placeholder banner logged every `log_license_period` — actual licence
/// inspection is out of scope (§5 Non-goals).
const LICENSE_BANNER: &str = "license monitoring is not implemented; see Non-goals";

pub struct Monitor {
    gateway: Arc<EngineGateway>,
    counters: Arc<Counters>,
    period: Duration,
    log_license_period: Duration,
    exit_on_thread_termination: bool,
    run_gdb: bool,
}

impl Monitor {
    pub fn new(
        gateway: Arc<EngineGateway>,
        counters: Arc<Counters>,
        period: Duration,
        log_license_period: Duration,
        exit_on_thread_termination: bool,
        run_gdb: bool,
    ) -> Self {
        Self {
            gateway,
            counters,
            period,
            log_license_period,
            exit_on_thread_termination,
            run_gdb,
        }
    }

    /// Runs forever. `total_workers` is the count at pipeline startup;
    /// `alive` is decremented by the Supervisor as each worker returns.
    pub async fn run(self, total_workers: usize, alive: Arc<AtomicUsize>) {
        let started_at = Instant::now();
        let mut previous = self.counters.snapshot();
        let mut since_license_log = Duration::ZERO;
        let mut tick = tokio::time::interval(self.period);
        tick.tick().await;

        loop {
            tick.tick().await;
            since_license_log += self.period;

            let live = alive.load(Ordering::Relaxed);
            let snapshot = self.counters.snapshot();
            let delta = snapshot.delta_since(&previous);
            previous = snapshot;

            tracing::info!(
                uptime_secs = started_at.elapsed().as_secs(),
                workers_total = total_workers,
                workers_live = live,
                redo_records_from_engine = snapshot.redo_records_from_engine,
                redo_records_from_engine_delta = delta.redo_records_from_engine,
                processed_redo_records = snapshot.processed_redo_records,
                processed_redo_records_delta = delta.processed_redo_records,
                sent_to_info_queue = snapshot.sent_to_info_queue,
                sent_to_info_queue_delta = delta.sent_to_info_queue,
                sent_to_failure_queue = snapshot.sent_to_failure_queue,
                sent_to_failure_queue_delta = delta.sent_to_failure_queue,
                sent_to_redo_queue = snapshot.sent_to_redo_queue,
                sent_to_redo_queue_delta = delta.sent_to_redo_queue,
                received_from_redo_queue = snapshot.received_from_redo_queue,
                received_from_redo_queue_delta = delta.received_from_redo_queue,
                "monitor tick"
            );

            match self.gateway.stats().await {
                Ok(stats) => tracing::info!(engine_stats = %stats, "engine stats"),
                Err(error) => tracing::warn!(error = %error, "failed to fetch engine stats"),
            }

            if since_license_log >= self.log_license_period {
                tracing::info!("{LICENSE_BANNER}");
                since_license_log = Duration::ZERO;
            }

            if self.run_gdb {
                self.dump_stack_trace().await;
            }

            if self.exit_on_thread_termination && live < total_workers {
                tracing::error!(workers_total = total_workers, workers_live = live, "a worker terminated early, exiting");
                std::process::exit(1);
            }
        }
    }

    async fn dump_stack_trace(&self) {
        let pid = std::process::id().to_string();
        let output = tokio::process::Command::new("gdb")
            .args(["-p", &pid, "-batch", "-ex", "thread apply all bt"])
            .output()
            .await;

        match output {
            Ok(output) => {
                let text = String::from_utf8_lossy(&output.stdout);
                let pattern = gdb_frame_pattern();
                let frames: Vec<&str> = text.lines().map(str::trim).filter(|line| pattern.is_match(line)).collect();
                tracing::debug!(frames = frames.join(" | "), "gdb stack dump");
            }
            Err(error) => tracing::debug!(error = %error, "gdb stack dump unavailable"),
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
