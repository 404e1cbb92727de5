//! Device screenshot acquisition and normalization pipeline.
//!
//! Obtains one raw frame buffer from an external device bridge, decodes
//! it into a canonical ARGB pixel grid, applies lossless quarter-turn
//! rotations on request, and exports the result as PNG. The bridge itself
//! is a collaborator behind [`snapdroid_bridge::BridgeClient`]; this crate
//! owns the policy around it: single-device selection, bounded discovery
//! waits, and the error taxonomy surfaced to users.

pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod grid;
pub mod session;

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use grid::{Orientation, PixelGrid};
pub use session::ScreenshotSession;
