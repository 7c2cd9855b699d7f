// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! redoer — drains an entity-resolution engine's redo backlog across one of
//! the fixed pipeline topologies in `cli::Command`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod cli;
mod error;
mod wiring;

use std::sync::Arc;

use clap::Parser;
use redo_core::{resolve_config, Counters, EngineGateway, InMemoryEngine, NoopGovernor, RedoRecord};
use redo_engine::Supervisor;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::cli::{Cli, Command};

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    guard
}

/// Races orderly shutdown signals against the pipeline's own completion.
/// A signal-initiated exit is success (exit 0) per P6; a pipeline-initiated
/// fatal exit is a failure, with the error already logged by the Supervisor.
async fn run_until_signal_or_done(supervisor: Supervisor, pipeline: wiring::Pipeline, monitor: redo_engine::Monitor) -> bool {
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            info!("received SIGTERM, exiting");
            true
        }
        _ = sigint.recv() => {
            info!("received SIGINT, exiting");
            true
        }
        result = supervisor.run(pipeline.workers, monitor) => result.is_ok(),
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let _log_guard = setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("redoer {}", env!("CARGO_PKG_VERSION"));
            std::process::ExitCode::SUCCESS
        }
        Command::Sleep => {
            let config = resolve_config(redo_core::RawOverrides::default());
            info!(delay_secs = config.delay.as_secs(), "sleeping before exit");
            tokio::time::sleep(config.delay).await;
            std::process::ExitCode::SUCCESS
        }
        command => {
            let subcommand = command.subcommand();
            let config = resolve_config(command.overrides());

            let Some(spec) = redo_core::lookup_pipeline(subcommand) else {
                error!(?subcommand, "subcommand does not resolve to a pipeline");
                return std::process::ExitCode::FAILURE;
            };

            if !config.delay.is_zero() {
                info!(delay_secs = config.delay.as_secs(), "applying startup delay");
                tokio::time::sleep(config.delay).await;
            }

            let counters = Arc::new(Counters::new());
            let gateway = Arc::new(engine_gateway(&config));
            let supervisor = Supervisor::new(Arc::clone(&gateway));

            let pipeline = match wiring::build_pipeline(
                spec,
                Arc::clone(supervisor.gateway()),
                &config,
                Arc::clone(&counters),
                Arc::new(NoopGovernor),
            )
            .await
            {
                Ok(pipeline) => pipeline,
                Err(error) => {
                    error!(%error, "failed to wire up the pipeline, exiting before any worker started");
                    return std::process::ExitCode::FAILURE;
                }
            };

            let monitor = redo_engine::Monitor::new(
                Arc::clone(&gateway),
                Arc::clone(&counters),
                config.monitoring_period,
                config.log_license_period,
                config.exit_on_thread_termination,
                config.run_gdb,
            );

            if run_until_signal_or_done(supervisor, pipeline, monitor).await {
                std::process::ExitCode::SUCCESS
            } else {
                std::process::ExitCode::FAILURE
            }
        }
    }
}

/// The engine handle backing every pipeline: an in-memory backlog, seeded
/// empty. A real deployment would bind this to the native engine instead,
/// passing it `config.engine_configuration_json`; no such binding is
/// attempted here (see crate-level Non-goals).
fn engine_gateway(_config: &redo_core::AppConfig) -> EngineGateway {
    let backlog: Vec<RedoRecord> = Vec::new();
    EngineGateway::new(Box::new(InMemoryEngine::new("default", backlog)))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
