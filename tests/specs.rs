// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box scenarios against the built `redoer` binary, the way the rest
//! of the workspace's per-crate tests exercise internals in-process. These
//! only cover what's observable from outside the process: exit codes and
//! startup-time configuration rejection.

use std::time::Duration;

use assert_cmd::Command;
use serial_test::serial;

fn redoer() -> Command {
    Command::cargo_bin("redoer").unwrap()
}

#[test]
fn version_exits_zero() {
    redoer().arg("version").assert().success();
}

#[test]
fn sleep_with_no_delay_exits_zero_promptly() {
    redoer()
        .arg("sleep")
        .arg("--delay-in-seconds")
        .arg("0")
        .timeout(Duration::from_secs(5))
        .assert()
        .success();
}

#[test]
#[serial(redoer_env)]
fn read_from_rabbitmq_without_a_host_fails_before_connecting_to_anything() {
    std::env::remove_var("REDOER_RABBITMQ_HOST");
    std::env::remove_var("REDOER_RABBITMQ_QUEUE");
    std::env::remove_var("REDOER_RABBITMQ_REDO_HOST");

    redoer()
        .arg("read-from-rabbitmq")
        .timeout(Duration::from_secs(5))
        .assert()
        .failure();
}

#[test]
fn an_unknown_subcommand_is_a_usage_error() {
    redoer().arg("not-a-real-subcommand").assert().failure();
}
