//! Debug-bridge client backed by the host `adb` executable.
//!
//! Every device interaction is an `adb` subprocess; the ADB wire
//! protocol stays inside that binary.

pub mod bridge;
pub mod devices;
pub mod screencap;

pub use bridge::{AdbBridge, AdbBridgeConfig};
