use anyhow::Result;
use async_trait::async_trait;

use crate::device::DeviceInfo;
use crate::frame::RawFrame;

/// External device-bridge client.
///
/// Backends wrap whatever actually talks to devices (in practice the host
/// `adb` installation). Errors are backend-specific; the capture pipeline
/// translates them into its own error taxonomy.
#[async_trait]
pub trait BridgeClient: Send + Sync {
    /// Whether the bridge has finished assembling its initial device list.
    ///
    /// Freshly started bridges need a moment before enumeration returns
    /// anything meaningful; callers poll this with a bounded wait instead
    /// of trusting the first listing.
    async fn is_device_list_ready(&self) -> Result<bool>;

    /// Enumerate currently connected devices, in bridge order.
    async fn list_devices(&self) -> Result<Vec<DeviceInfo>>;

    /// Retrieve one raw frame buffer from the given device.
    ///
    /// `landscape` asks the bridge to apply its device-side landscape
    /// correction before handing the frame over; any further rotation is
    /// the caller's business. Returns `Ok(None)` when the device went
    /// unavailable mid-call and no frame could be read, which is distinct
    /// from a backend failure.
    async fn fetch_raw_frame(&self, device: &DeviceInfo, landscape: bool)
        -> Result<Option<RawFrame>>;
}
