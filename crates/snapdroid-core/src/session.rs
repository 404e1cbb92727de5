//! Capture orchestration: bounded device discovery, the single-device
//! policy, frame acquisition, decode, and rotation.

use snapdroid_bridge::{BridgeClient, DeviceInfo};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;
use crate::decode;
use crate::error::CaptureError;
use crate::grid::{Orientation, PixelGrid};

/// One capture session against one bridge client.
///
/// A session never retries a failed capture and never holds partial
/// results; every error is terminal for that call. At most one capture
/// runs at a time per session, a concurrent second call fails fast with
/// [`CaptureError::SessionBusy`] instead of queueing.
pub struct ScreenshotSession {
    client: Box<dyn BridgeClient>,
    config: CaptureConfig,
    in_flight: Mutex<()>,
}

impl ScreenshotSession {
    pub fn new(client: Box<dyn BridgeClient>, config: CaptureConfig) -> Self {
        Self {
            client,
            config,
            in_flight: Mutex::new(()),
        }
    }

    /// Run one full capture: wait for the device list, require exactly
    /// one connected device, fetch its frame, decode, rotate.
    ///
    /// `landscape` asks the bridge for its device-side landscape
    /// correction; `rotation` is applied here on the decoded grid, on
    /// top of whatever the bridge already did.
    pub async fn capture(
        &self,
        landscape: bool,
        rotation: Orientation,
    ) -> Result<PixelGrid, CaptureError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| CaptureError::SessionBusy)?;

        let device = self.wait_for_single_device().await?;
        info!(
            "capturing from {}: landscape={}, rotation={} deg",
            device.serial,
            landscape,
            rotation.degrees()
        );

        let frame = match self.client.fetch_raw_frame(&device, landscape).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                return Err(CaptureError::DeviceUnavailable {
                    serial: device.serial,
                    reason: "device returned no frame".to_string(),
                })
            }
            Err(e) => {
                return Err(CaptureError::DeviceUnavailable {
                    serial: device.serial,
                    reason: format!("{:#}", e),
                })
            }
        };

        debug!(
            "raw frame from {}: {}x{} at {} bpp, {} bytes",
            device.serial,
            frame.width,
            frame.height,
            frame.bits_per_pixel,
            frame.data.len()
        );

        let grid = decode::decode(&frame)?;
        Ok(grid.rotate(rotation))
    }

    /// Discovery only: the same bounded wait as a capture, returning the
    /// device list as the bridge reported it.
    pub async fn devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| CaptureError::SessionBusy)?;
        self.wait_for_device_list().await
    }

    async fn wait_for_single_device(&self) -> Result<DeviceInfo, CaptureError> {
        let mut devices = self.wait_for_device_list().await?;
        debug!("discovery found {} device(s)", devices.len());

        match devices.len() {
            0 => Err(CaptureError::NoDeviceFound),
            1 => {
                let device = devices.remove(0);
                if !device.state.is_usable() {
                    return Err(CaptureError::DeviceUnavailable {
                        reason: format!("device state is {}", device.state),
                        serial: device.serial,
                    });
                }
                Ok(device)
            }
            count => Err(CaptureError::AmbiguousDevice { count }),
        }
    }

    /// Sleep-poll the bridge until its device list is ready, then take
    /// the first listing that succeeds. Probe and listing failures are
    /// logged and retried until the configured deadline.
    async fn wait_for_device_list(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        let started = Instant::now();
        let deadline = started + self.config.discovery_timeout();

        loop {
            match self.client.is_device_list_ready().await {
                Ok(true) => match self.client.list_devices().await {
                    Ok(devices) => return Ok(devices),
                    Err(e) => warn!("device listing failed, retrying: {:#}", e),
                },
                Ok(false) => debug!("device list not ready yet"),
                Err(e) => warn!("device list readiness probe failed: {:#}", e),
            }

            if Instant::now() >= deadline {
                return Err(CaptureError::DiscoveryTimeout {
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(self.config.discovery_poll()).await;
        }
    }
}
