// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn redo_pulls_from_engine_and_only_logs() {
    let spec = lookup_pipeline(Subcommand::Redo).unwrap();
    assert_eq!(spec.input, InputRole::PullFromEngine);
    assert_eq!(spec.execute, ExecuteRole::ApplyPlain);
    assert_eq!(spec.output, OutputRole::LogOnly);
    assert!(spec.has_feeder);
}

#[test]
fn redo_withinfo_publishes_to_the_named_bus() {
    let spec = lookup_pipeline(Subcommand::RedoWithInfo(Bus::Kafka)).unwrap();
    assert_eq!(spec.execute, ExecuteRole::ApplyWithInfo);
    assert_eq!(spec.output, OutputRole::Publish(Bus::Kafka));
}

#[test]
fn read_from_bus_has_no_feeder() {
    let spec = lookup_pipeline(Subcommand::ReadFrom(Bus::Sqs)).unwrap();
    assert_eq!(spec.input, InputRole::Subscribe(Bus::Sqs));
    assert!(!spec.has_feeder);
}

#[test]
fn write_to_bus_forwards_without_applying() {
    let spec = lookup_pipeline(Subcommand::WriteTo(Bus::AzureQueue)).unwrap();
    assert_eq!(spec.execute, ExecuteRole::ForwardTo(Bus::AzureQueue));
    assert_eq!(spec.output, OutputRole::LogOnly);
}

#[test]
fn trivial_subcommands_have_no_pipeline() {
    assert_eq!(lookup_pipeline(Subcommand::Sleep), None);
    assert_eq!(lookup_pipeline(Subcommand::Version), None);
}
