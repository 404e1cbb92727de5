use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Explicit path to the adb executable; when unset the backend
    /// searches PATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adb_path: Option<PathBuf>,

    /// Upper bound on the device-discovery wait, in milliseconds
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_ms: u64,

    /// Pause between discovery probes, in milliseconds
    #[serde(default = "default_discovery_poll")]
    pub discovery_poll_ms: u64,

    /// Stop the adb server on shutdown when this process started it
    #[serde(default)]
    pub kill_server_on_drop: bool,
}

fn default_discovery_timeout() -> u64 {
    10_000
}
fn default_discovery_poll() -> u64 {
    100
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            adb_path: None,
            discovery_timeout_ms: default_discovery_timeout(),
            discovery_poll_ms: default_discovery_poll(),
            kill_server_on_drop: false,
        }
    }
}

impl CaptureConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "snapdroid", "snapdroid") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("snapdroid-config.json")
        }
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&data).with_context(|| "failed to parse config JSON")?;
        Ok(config)
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Override the discovery timeout, given in whole seconds.
    pub fn set_discovery_timeout_secs(&mut self, secs: u64) {
        self.discovery_timeout_ms = secs.saturating_mul(1_000);
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn discovery_poll(&self) -> Duration {
        Duration::from_millis(self.discovery_poll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config: CaptureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CaptureConfig::default());
        assert_eq!(config.discovery_timeout_ms, 10_000);
        assert_eq!(config.discovery_poll_ms, 100);
        assert!(!config.kill_server_on_drop);
        assert!(config.adb_path.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let config = CaptureConfig {
            adb_path: Some(PathBuf::from("/opt/platform-tools/adb")),
            discovery_timeout_ms: 2_500,
            discovery_poll_ms: 50,
            kill_server_on_drop: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CaptureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unset_adb_path_not_serialized() {
        let json = serde_json::to_string(&CaptureConfig::default()).unwrap();
        assert!(!json.contains("adb_path"));
    }

    #[test]
    fn test_timeout_secs_override_saturates() {
        let mut config = CaptureConfig::default();
        config.set_discovery_timeout_secs(30);
        assert_eq!(config.discovery_timeout_ms, 30_000);
        config.set_discovery_timeout_secs(u64::MAX);
        assert_eq!(config.discovery_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_duration_accessors() {
        let config = CaptureConfig {
            discovery_timeout_ms: 1_500,
            discovery_poll_ms: 25,
            ..CaptureConfig::default()
        };
        assert_eq!(config.discovery_timeout(), Duration::from_millis(1_500));
        assert_eq!(config.discovery_poll(), Duration::from_millis(25));
    }

    #[test]
    fn test_save_and_load() {
        let config = CaptureConfig {
            discovery_timeout_ms: 7_000,
            ..CaptureConfig::default()
        };
        let path =
            std::env::temp_dir().join(format!("snapdroid-config-{}.json", std::process::id()));
        config.save(&path).unwrap();
        let loaded = CaptureConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
