// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::internal::InternalAdapter;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.logs.lock().unwrap()).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn publish_emits_a_span_with_the_carrier_name() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt().with_writer(logs.clone()).finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let adapter = TracedAdapter::new("internal", InternalAdapter::new(4));
    adapter.publish(&RedoRecord::new("R1")).await.unwrap();

    assert!(logs.contents().contains("internal"));
}

#[tokio::test]
async fn acknowledge_delegates_to_the_inner_adapter() {
    let adapter = TracedAdapter::new("internal", InternalAdapter::new(1));
    adapter.acknowledge(AckTag::None).await.unwrap();
}
