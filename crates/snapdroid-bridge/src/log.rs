//! Pluggable sink for diagnostics emitted by a bridge backend.
//!
//! Bridge processes chatter on stderr (daemon startup notices, device
//! warnings). Backends forward that output here instead of redirecting
//! global logging, so embedders decide where it goes.

use tracing::{debug, error, info, warn};

/// Severity of a bridge diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeLogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Receives diagnostic output from a bridge backend.
pub trait BridgeLogSink: Send + Sync {
    fn log(&self, level: BridgeLogLevel, tag: &str, message: &str);
}

/// Forwards bridge diagnostics to the active `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingLogSink;

impl BridgeLogSink for TracingLogSink {
    fn log(&self, level: BridgeLogLevel, tag: &str, message: &str) {
        match level {
            BridgeLogLevel::Debug => debug!("[{}] {}", tag, message),
            BridgeLogLevel::Info => info!("[{}] {}", tag, message),
            BridgeLogLevel::Warn => warn!("[{}] {}", tag, message),
            BridgeLogLevel::Error => error!("[{}] {}", tag, message),
        }
    }
}

/// Discards all bridge diagnostics.
#[derive(Debug, Default)]
pub struct NullLogSink;

impl BridgeLogSink for NullLogSink {
    fn log(&self, _level: BridgeLogLevel, _tag: &str, _message: &str) {}
}
