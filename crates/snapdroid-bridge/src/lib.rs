//! Facade over the external device bridge: the data a bridge backend
//! produces (raw frames, device listings) and the traits a backend
//! implements. No I/O of its own.

pub mod client;
pub mod device;
pub mod frame;
pub mod log;

pub use client::BridgeClient;
pub use device::{DeviceInfo, DeviceState};
pub use frame::RawFrame;
pub use log::{BridgeLogLevel, BridgeLogSink, NullLogSink, TracingLogSink};
