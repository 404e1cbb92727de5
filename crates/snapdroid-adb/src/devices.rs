//! Parser for `adb devices -l` output.

use snapdroid_bridge::{DeviceInfo, DeviceState};

/// Parse a device listing as printed by `adb devices -l`.
///
/// Skips the banner, blank lines, and daemon-startup notices. Each
/// remaining line is `SERIAL STATE [key:value ...]`; the `model:` tag is
/// picked up when present, other tags are ignored.
pub fn parse_devices(output: &str) -> Vec<DeviceInfo> {
    let mut devices = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('*') || line.starts_with("List of devices") {
            continue;
        }

        let mut fields = line.split_whitespace();
        let serial = match fields.next() {
            Some(serial) => serial,
            None => continue,
        };
        let state = match fields.next() {
            Some(state) => state,
            None => continue,
        };
        let model = fields
            .filter_map(|field| field.strip_prefix("model:"))
            .next()
            .map(str::to_string);

        devices.push(DeviceInfo {
            serial: serial.to_string(),
            state: DeviceState::parse(state),
            model,
        });
    }

    devices
}
