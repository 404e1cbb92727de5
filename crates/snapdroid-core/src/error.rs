use std::time::Duration;

use thiserror::Error;

/// Ways a single capture, decode or export attempt can fail.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally, and no partial result accompanies an error. The
/// messages are written to be shown to an end user as-is.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(
        "could not find a device; make sure it is connected over USB \
         and USB debugging is enabled in Developer options"
    )]
    NoDeviceFound,

    #[error("{count} devices connected; refusing to guess which one to capture")]
    AmbiguousDevice { count: usize },

    #[error("device {serial} is unavailable: {reason}")]
    DeviceUnavailable { serial: String, reason: String },

    #[error("raw frame too short: expected {expected} bytes, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    #[error("unsupported pixel format: {bits_per_pixel} bits per pixel")]
    UnsupportedPixelFormat { bits_per_pixel: u32 },

    #[error("timed out after {waited:?} waiting for the device list")]
    DiscoveryTimeout { waited: Duration },

    #[error("a capture is already in flight on this session")]
    SessionBusy,

    #[error("could not encode image: {reason}")]
    Export { reason: String },
}
