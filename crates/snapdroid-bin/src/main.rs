use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use snapdroid_adb::{AdbBridge, AdbBridgeConfig};
use snapdroid_bridge::TracingLogSink;
use snapdroid_core::export;
use snapdroid_core::{CaptureConfig, Orientation, ScreenshotSession};

#[derive(Parser, Debug)]
#[command(name = "snapdroid")]
#[command(about = "Android device screenshots over the debug bridge")]
#[command(version)]
struct Cli {
    /// Path to the adb executable (default: search PATH)
    #[arg(long, env = "SNAPDROID_ADB", global = true)]
    adb: Option<PathBuf>,

    /// Device discovery timeout in seconds
    #[arg(long, env = "SNAPDROID_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(long, env = "SNAPDROID_CONFIG_PATH", global = true)]
    config_path: Option<PathBuf>,

    /// Write the effective config back to the config file
    #[arg(long, global = true)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "SNAPDROID_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Capture a screenshot from the single connected device
    Capture {
        /// Output file (PNG)
        #[arg(short, long, default_value = "screenshot.png")]
        output: PathBuf,

        /// Ask the device for its landscape-corrected frame
        #[arg(long)]
        landscape: bool,

        /// Extra clockwise rotation in degrees (multiple of 90)
        #[arg(long, default_value_t = 0)]
        rotate: u32,
    },
    /// List devices visible to the debug bridge
    Devices {
        /// Print the listing as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    info!(
        "snapdroid v{} starting (os={}, arch={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    );

    // Load config, then let CLI args override it
    let config_path = cli
        .config_path
        .clone()
        .unwrap_or_else(CaptureConfig::default_path);

    let mut config = if config_path.exists() {
        info!("loading config from {}", config_path.display());
        CaptureConfig::load(&config_path)?
    } else {
        CaptureConfig::default()
    };

    if let Some(adb) = cli.adb {
        config.adb_path = Some(adb);
    }
    if let Some(secs) = cli.timeout {
        config.set_discovery_timeout_secs(secs);
    }

    if cli.save_config {
        config.save(&config_path)?;
        info!("config saved to {}", config_path.display());
    }

    let session = start_session(&config).await?;

    match cli.command {
        Commands::Capture {
            output,
            landscape,
            rotate,
        } => run_capture(&session, output, landscape, rotate).await,
        Commands::Devices { json } => run_devices(&session, json).await,
    }
}

async fn start_session(config: &CaptureConfig) -> Result<ScreenshotSession> {
    let bridge_config = AdbBridgeConfig {
        adb_path: config.adb_path.clone(),
        server_start_timeout: config.discovery_timeout(),
        kill_server_on_drop: config.kill_server_on_drop,
    };
    let bridge = AdbBridge::start(bridge_config, Arc::new(TracingLogSink::default()))
        .await
        .context("failed to start the debug bridge")?;
    Ok(ScreenshotSession::new(Box::new(bridge), config.clone()))
}

async fn run_capture(
    session: &ScreenshotSession,
    output: PathBuf,
    landscape: bool,
    rotate: u32,
) -> Result<()> {
    let rotation = Orientation::from_degrees(rotate)
        .context("rotation must be a multiple of 90 degrees")?;

    let grid = session.capture(landscape, rotation).await?;
    export::write_png(&grid, &output)?;

    info!(
        "wrote {}x{} screenshot to {}",
        grid.width(),
        grid.height(),
        output.display()
    );
    println!("{} ({}x{})", output.display(), grid.width(), grid.height());
    Ok(())
}

async fn run_devices(session: &ScreenshotSession, json: bool) -> Result<()> {
    let devices = session.devices().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }
    if devices.is_empty() {
        println!("no devices found");
        return Ok(());
    }
    for device in devices {
        match device.model {
            Some(model) => println!("{}\t{}\t{}", device.serial, device.state, model),
            None => println!("{}\t{}", device.serial, device.state),
        }
    }
    Ok(())
}
