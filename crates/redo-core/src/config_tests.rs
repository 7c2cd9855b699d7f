// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn cli_flag_takes_precedence_over_env_and_default() {
    std::env::set_var("REDOER_THREADS_PER_PROCESS", "2");
    let overrides = RawOverrides {
        threads_per_process: Some(8),
        ..Default::default()
    };
    let config = resolve_config(overrides);
    assert_eq!(config.threads_per_process, 8);
    std::env::remove_var("REDOER_THREADS_PER_PROCESS");
}

#[test]
#[serial]
fn env_var_takes_precedence_over_default_when_no_flag() {
    std::env::set_var("REDOER_THREADS_PER_PROCESS", "2");
    let config = resolve_config(RawOverrides::default());
    assert_eq!(config.threads_per_process, 2);
    std::env::remove_var("REDOER_THREADS_PER_PROCESS");
}

#[test]
#[serial]
fn default_applies_when_neither_flag_nor_env_present() {
    std::env::remove_var("REDOER_THREADS_PER_PROCESS");
    let config = resolve_config(RawOverrides::default());
    assert_eq!(config.threads_per_process, 4);
}

#[test]
#[serial]
fn bus_role_endpoint_falls_back_to_unqualified_key() {
    std::env::remove_var("REDOER_KAFKA_REDO_HOST");
    std::env::set_var("REDOER_KAFKA_HOST", "broker:9092");
    let endpoint = resolve_bus_endpoint(Bus::Kafka, "redo");
    assert_eq!(endpoint.host.as_deref(), Some("broker:9092"));
    std::env::remove_var("REDOER_KAFKA_HOST");
}

#[test]
#[serial]
fn bus_role_endpoint_prefers_role_scoped_key() {
    std::env::set_var("REDOER_KAFKA_HOST", "broker:9092");
    std::env::set_var("REDOER_KAFKA_FAILURE_HOST", "broker-failure:9092");
    let endpoint = resolve_bus_endpoint(Bus::Kafka, "failure");
    assert_eq!(endpoint.host.as_deref(), Some("broker-failure:9092"));
    std::env::remove_var("REDOER_KAFKA_HOST");
    std::env::remove_var("REDOER_KAFKA_FAILURE_HOST");
}

#[test]
fn sensitive_keys_are_flagged_for_redaction() {
    assert!(is_sensitive_key("engine_configuration_json"));
    assert!(is_sensitive_key("azure_connection_string"));
    assert!(is_sensitive_key("rabbitmq_password"));
    assert!(!is_sensitive_key("threads_per_process"));
}
