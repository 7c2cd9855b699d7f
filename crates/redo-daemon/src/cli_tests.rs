// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use redo_core::{resolve_config, Bus, Subcommand};
use serial_test::serial;

use super::*;

#[test]
fn redo_resolves_to_the_plain_pull_pipeline() {
    let cli = Cli::try_parse_from(["redoer", "redo"]).unwrap();
    assert!(matches!(cli.command.subcommand(), Subcommand::Redo));
}

#[test]
fn redo_withinfo_kafka_carries_the_kafka_bus() {
    let cli = Cli::try_parse_from(["redoer", "redo-withinfo-kafka"]).unwrap();
    assert!(matches!(cli.command.subcommand(), Subcommand::RedoWithInfo(Bus::Kafka)));
}

#[test]
fn write_to_azure_queue_parses() {
    let cli = Cli::try_parse_from(["redoer", "write-to-azure-queue"]).unwrap();
    assert!(matches!(cli.command.subcommand(), Subcommand::WriteTo(Bus::AzureQueue)));
}

#[test]
fn sleep_and_version_need_no_flags() {
    assert!(matches!(Cli::try_parse_from(["redoer", "sleep"]).unwrap().command, Command::Sleep));
    assert!(matches!(Cli::try_parse_from(["redoer", "version"]).unwrap().command, Command::Version));
}

#[test]
#[serial(redoer_env)]
fn a_cli_flag_outranks_the_environment_variable_which_outranks_the_default() {
    std::env::remove_var("REDOER_THREADS_PER_PROCESS");
    let cli = Cli::try_parse_from(["redoer", "redo"]).unwrap();
    let config = resolve_config(cli.command.overrides());
    assert_eq!(config.threads_per_process, 4);

    std::env::set_var("REDOER_THREADS_PER_PROCESS", "2");
    let cli = Cli::try_parse_from(["redoer", "redo"]).unwrap();
    let config = resolve_config(cli.command.overrides());
    assert_eq!(config.threads_per_process, 2);

    let cli = Cli::try_parse_from(["redoer", "redo", "--threads-per-process", "8"]).unwrap();
    let config = resolve_config(cli.command.overrides());
    assert_eq!(config.threads_per_process, 8);

    std::env::remove_var("REDOER_THREADS_PER_PROCESS");
}
