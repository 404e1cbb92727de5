//! Lifecycle and subprocess plumbing for the `adb`-backed client.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use snapdroid_bridge::{BridgeClient, BridgeLogLevel, BridgeLogSink, DeviceInfo, RawFrame};
use tokio::process::Command;
use tracing::{debug, info};

use crate::devices;
use crate::screencap;

/// Settings for starting an [`AdbBridge`].
#[derive(Debug, Clone)]
pub struct AdbBridgeConfig {
    /// Explicit adb executable; PATH lookup when unset
    pub adb_path: Option<PathBuf>,
    /// Bound on `adb start-server`
    pub server_start_timeout: Duration,
    /// Stop the adb server on drop when this bridge started it
    pub kill_server_on_drop: bool,
}

impl Default for AdbBridgeConfig {
    fn default() -> Self {
        Self {
            adb_path: None,
            server_start_timeout: Duration::from_secs(10),
            kill_server_on_drop: false,
        }
    }
}

/// Bridge client driving the host `adb` binary.
///
/// Holds no connection of its own: each call is one `adb` subprocess,
/// and the adb server keeps the device state between calls. The bridge
/// remembers whether it was the one that started that server so it can
/// tear down exactly what it set up.
pub struct AdbBridge {
    adb: PathBuf,
    log: Arc<dyn BridgeLogSink>,
    kill_server_on_drop: bool,
    spawned_server: bool,
    ready: AtomicBool,
}

impl AdbBridge {
    /// Locate adb and make sure its server is running.
    pub async fn start(config: AdbBridgeConfig, log: Arc<dyn BridgeLogSink>) -> Result<AdbBridge> {
        let adb = match config.adb_path {
            Some(path) => path,
            None => which::which("adb")
                .context("adb executable not found in PATH (is platform-tools installed?)")?,
        };
        info!("starting debug bridge via {}", adb.display());

        let output = tokio::time::timeout(
            config.server_start_timeout,
            Command::new(&adb)
                .arg("start-server")
                .stdin(Stdio::null())
                .output(),
        )
        .await
        .context("adb start-server timed out")?
        .with_context(|| format!("failed to run {}", adb.display()))?;

        forward_stderr(
            log.as_ref(),
            "start-server",
            output.status.success(),
            &output.stderr,
        );
        if !output.status.success() {
            bail!("adb start-server exited with {}", output.status);
        }

        // The daemon-startup notice only appears when this invocation
        // spawned a new server.
        let spawned_server =
            String::from_utf8_lossy(&output.stderr).contains("daemon started successfully");
        if spawned_server {
            info!("adb server started by this process");
        }

        Ok(AdbBridge {
            adb,
            log,
            kill_server_on_drop: config.kill_server_on_drop,
            spawned_server,
            ready: AtomicBool::new(false),
        })
    }

    async fn run_adb(&self, tag: &str, args: &[&str]) -> Result<Vec<u8>> {
        debug!("running {} {}", self.adb.display(), args.join(" "));
        let output = Command::new(&self.adb)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.adb.display()))?;

        forward_stderr(self.log.as_ref(), tag, output.status.success(), &output.stderr);

        if !output.status.success() {
            bail!("adb {} exited with {}", args.join(" "), output.status);
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl BridgeClient for AdbBridge {
    async fn is_device_list_ready(&self) -> Result<bool> {
        if self.ready.load(Ordering::SeqCst) {
            return Ok(true);
        }
        // The first tracked-devices query that succeeds doubles as the
        // readiness signal.
        match self.run_adb("devices", &["devices"]).await {
            Ok(_) => {
                self.ready.store(true, Ordering::SeqCst);
                Ok(true)
            }
            Err(e) => {
                debug!("device list not ready: {:#}", e);
                Ok(false)
            }
        }
    }

    async fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let stdout = self.run_adb("devices", &["devices", "-l"]).await?;
        let listing = String::from_utf8_lossy(&stdout);
        Ok(devices::parse_devices(&listing))
    }

    async fn fetch_raw_frame(
        &self,
        device: &DeviceInfo,
        landscape: bool,
    ) -> Result<Option<RawFrame>> {
        debug!("requesting screencap from {}", device.serial);
        let raw = self
            .run_adb(
                "screencap",
                &["-s", &device.serial, "exec-out", "screencap"],
            )
            .await?;

        let frame = match screencap::parse(&raw).context("parsing screencap reply")? {
            Some(frame) => frame,
            None => {
                debug!(
                    "screencap from {} returned {} bytes, no usable frame",
                    device.serial,
                    raw.len()
                );
                return Ok(None);
            }
        };

        Ok(Some(if landscape {
            screencap::rotate_landscape(frame)
        } else {
            frame
        }))
    }
}

impl Drop for AdbBridge {
    fn drop(&mut self) {
        if self.spawned_server && self.kill_server_on_drop {
            info!("stopping adb server");
            let _ = std::process::Command::new(&self.adb)
                .arg("kill-server")
                .stdin(Stdio::null())
                .output();
        }
    }
}

fn forward_stderr(log: &dyn BridgeLogSink, tag: &str, success: bool, stderr: &[u8]) {
    let level = if success {
        BridgeLogLevel::Info
    } else {
        BridgeLogLevel::Warn
    };
    for line in String::from_utf8_lossy(stderr).lines() {
        let line = line.trim();
        if !line.is_empty() {
            log.log(level, tag, line);
        }
    }
}
