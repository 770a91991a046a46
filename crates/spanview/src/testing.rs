// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared fixtures and helpers for unit tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// The numbers -25 through 25 as little-endian `i16` values, 102 bytes in total.
pub(crate) fn neg25_to_pos25_le() -> Vec<u8> {
    (-25_i16..=25).flat_map(i16::to_le_bytes).collect()
}

/// The numbers -50 through 50, 101 elements in total.
pub(crate) fn neg50_to_pos50() -> Vec<i32> {
    (-50..=50).collect()
}

/// Collects the formatted log output of a subscriber for assertions.
#[derive(Debug, Default)]
pub(crate) struct LogCapture {
    output: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A subscriber that records every event into this capture. Install it with `set_default()`.
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + use<> {
        let output = Arc::clone(&self.output);

        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || CaptureWriter(Arc::clone(&output)))
            .finish()
    }

    pub(crate) fn assert_contains(&self, expected: &str) {
        let output = String::from_utf8_lossy(&self.output.lock().unwrap()).into_owned();

        assert!(output.contains(expected), "'{expected}' not found in log output:\n{output}");
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;

    #[test]
    fn fixtures() {
        let bytes = neg25_to_pos25_le();
        assert_eq!(bytes.len(), 102);
        assert_eq!(bytes[..2], [231, 255]);

        let numbers = neg50_to_pos50();
        assert_eq!(numbers.len(), 101);
        assert_eq!(numbers.first(), Some(&-50));
    }

    #[test]
    fn captures_events() {
        let log_capture = LogCapture::new();
        let _guard = log_capture.subscriber().set_default();

        tracing::warn!(answer = 42, "captured");

        log_capture.assert_contains("captured");
        log_capture.assert_contains("answer=42");
    }
}
