// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration resolution: CLI flag > environment variable > default.
//!
//! [`RawOverrides`] holds whatever was explicitly passed on the command line
//! (`None` means "flag absent"); [`resolve`] layers each field's `REDOER_*`
//! environment variable, then its hardcoded default, over that.

use crate::pipeline::Bus;
use std::time::Duration;

/// Explicit CLI values, as parsed by the daemon's argument parser. Every
/// field is optional: a `None` means the flag was not passed, and resolution
/// falls through to the environment variable, then the default.
#[derive(Debug, Clone, Default)]
pub struct RawOverrides {
    pub threads_per_process: Option<u32>,
    pub queue_maxsize: Option<usize>,
    pub redo_sleep_time_in_seconds: Option<u64>,
    pub redo_retry_sleep_time_in_seconds: Option<u64>,
    pub redo_retry_limit: Option<u32>,
    pub monitoring_period_in_seconds: Option<u64>,
    pub log_license_period_in_seconds: Option<u64>,
    pub expiration_warning_in_days: Option<u32>,
    pub delay_in_seconds: Option<u64>,
    pub exit_on_thread_termination: Option<bool>,
    pub run_gdb: Option<bool>,
    pub rabbitmq_prefetch_count: Option<u32>,
    pub rabbitmq_delivery_mode: Option<u8>,
    pub rabbitmq_heartbeat_in_seconds: Option<u64>,
    pub rabbitmq_reconnect_delay_in_seconds: Option<u64>,
    pub rabbitmq_use_existing_entities: Option<bool>,
    pub engine_configuration_json: Option<String>,
}

/// AMQP-specific tuning, broken out since every one of these keys is only
/// meaningful for the RabbitMQ adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabbitmqConfig {
    pub prefetch_count: u32,
    pub delivery_mode: u8,
    pub heartbeat: Duration,
    pub reconnect_delay: Duration,
    pub use_existing_entities: bool,
}

/// Host/queue/topic/credential endpoint for one (bus, role) pair, e.g.
/// (Kafka, "redo") or (Sqs, "failure"). Role-scoped keys fall back to the
/// bus's unqualified key when unset, per §6.2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusRoleEndpoint {
    pub host: Option<String>,
    pub queue: Option<String>,
    pub topic: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connection_string: Option<String>,
}

/// The fully-resolved configuration table, built once at startup and held
/// immutably for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub threads_per_process: u32,
    pub queue_maxsize: usize,
    pub redo_sleep_time: Duration,
    pub redo_retry_sleep_time: Duration,
    pub redo_retry_limit: u32,
    pub monitoring_period: Duration,
    pub log_license_period: Duration,
    pub expiration_warning_in_days: u32,
    pub delay: Duration,
    pub exit_on_thread_termination: bool,
    pub run_gdb: bool,
    pub rabbitmq: RabbitmqConfig,
    /// Never logged verbatim; redacted as `***` by any banner/debug dump.
    pub engine_configuration_json: Option<String>,
}

impl AppConfig {
    /// Endpoint for the given (bus, role) pair, reading straight from the
    /// environment — these keys are too numerous (4 buses × 3 roles × 6
    /// fields) to carry as CLI flags, so only the env/default layers apply.
    pub fn bus_endpoint(&self, bus: Bus, role: &str) -> BusRoleEndpoint {
        resolve_bus_endpoint(bus, role)
    }
}

fn resolve<T: std::str::FromStr>(cli: Option<T>, env_key: &str, default: T) -> T {
    cli.or_else(|| std::env::var(env_key).ok().and_then(|s| s.parse().ok()))
        .unwrap_or(default)
}

fn resolve_secs(cli: Option<u64>, env_key: &str, default_secs: u64) -> Duration {
    let secs = cli
        .or_else(|| std::env::var(env_key).ok().and_then(|s| s.parse().ok()))
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

/// Layer environment variables and defaults over explicit CLI overrides.
pub fn resolve_config(overrides: RawOverrides) -> AppConfig {
    AppConfig {
        threads_per_process: resolve(
            overrides.threads_per_process,
            "REDOER_THREADS_PER_PROCESS",
            4,
        ),
        queue_maxsize: resolve(overrides.queue_maxsize, "REDOER_QUEUE_MAXSIZE", 10),
        redo_sleep_time: resolve_secs(
            overrides.redo_sleep_time_in_seconds,
            "REDOER_REDO_SLEEP_TIME_IN_SECONDS",
            10,
        ),
        redo_retry_sleep_time: resolve_secs(
            overrides.redo_retry_sleep_time_in_seconds,
            "REDOER_REDO_RETRY_SLEEP_TIME_IN_SECONDS",
            60,
        ),
        redo_retry_limit: resolve(overrides.redo_retry_limit, "REDOER_REDO_RETRY_LIMIT", 5),
        monitoring_period: resolve_secs(
            overrides.monitoring_period_in_seconds,
            "REDOER_MONITORING_PERIOD_IN_SECONDS",
            600,
        ),
        log_license_period: resolve_secs(
            overrides.log_license_period_in_seconds,
            "REDOER_LOG_LICENSE_PERIOD_IN_SECONDS",
            86400,
        ),
        expiration_warning_in_days: resolve(
            overrides.expiration_warning_in_days,
            "REDOER_EXPIRATION_WARNING_IN_DAYS",
            30,
        ),
        delay: resolve_secs(overrides.delay_in_seconds, "REDOER_DELAY_IN_SECONDS", 0),
        exit_on_thread_termination: resolve(
            overrides.exit_on_thread_termination,
            "REDOER_EXIT_ON_THREAD_TERMINATION",
            false,
        ),
        run_gdb: resolve(overrides.run_gdb, "REDOER_RUN_GDB", false),
        rabbitmq: RabbitmqConfig {
            prefetch_count: resolve(
                overrides.rabbitmq_prefetch_count,
                "REDOER_RABBITMQ_PREFETCH_COUNT",
                50,
            ),
            delivery_mode: resolve(
                overrides.rabbitmq_delivery_mode,
                "REDOER_RABBITMQ_DELIVERY_MODE",
                1,
            ),
            heartbeat: resolve_secs(
                overrides.rabbitmq_heartbeat_in_seconds,
                "REDOER_RABBITMQ_HEARTBEAT_IN_SECONDS",
                60,
            ),
            reconnect_delay: resolve_secs(
                overrides.rabbitmq_reconnect_delay_in_seconds,
                "REDOER_RABBITMQ_RECONNECT_DELAY_IN_SECONDS",
                60,
            ),
            use_existing_entities: resolve(
                overrides.rabbitmq_use_existing_entities,
                "REDOER_RABBITMQ_USE_EXISTING_ENTITIES",
                true,
            ),
        },
        engine_configuration_json: overrides
            .engine_configuration_json
            .or_else(|| std::env::var("REDOER_ENGINE_CONFIGURATION_JSON").ok()),
    }
}

fn resolve_bus_endpoint(bus: Bus, role: &str) -> BusRoleEndpoint {
    let bus_key = bus.to_string().to_uppercase().replace('-', "_");
    let role_key = role.to_uppercase();
    let lookup = |field: &str| -> Option<String> {
        let scoped = format!("REDOER_{bus_key}_{role_key}_{field}");
        let unqualified = format!("REDOER_{bus_key}_{field}");
        std::env::var(scoped).ok().or_else(|| std::env::var(unqualified).ok())
    };
    BusRoleEndpoint {
        host: lookup("HOST"),
        queue: lookup("QUEUE"),
        topic: lookup("TOPIC"),
        username: lookup("USERNAME"),
        password: lookup("PASSWORD"),
        connection_string: lookup("CONNECTION_STRING"),
    }
}

/// Keys whose values must never appear verbatim in a banner or debug dump.
pub fn is_sensitive_key(key: &str) -> bool {
    matches!(key, "engine_configuration_json")
        || key.ends_with("_password")
        || key.ends_with("_connection_string")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
