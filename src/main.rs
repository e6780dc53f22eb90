//! autotrack - camera mount tracking over a serial motor controller.
//!
//! Drives the control loop from recorded detections so the tracking and the
//! motor link can be exercised without a camera.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info, trace};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use autotrack_rs::{
    command::CommandChannel,
    config::Config,
    error::RunError,
    integration::{ReplaySource, TrackingPipeline},
    tracker::TrackingController,
};

/// Camera mount auto-tracker
#[derive(Parser, Debug)]
#[command(name = "autotrack", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recorded detections: one JSON array of [x, y, w, h] boxes per line
    #[arg(short, long)]
    replay: PathBuf,

    /// Serial port (overrides config)
    #[arg(long)]
    port: Option<String>,

    /// Baud rate (overrides config)
    #[arg(long)]
    baud: Option<u32>,

    /// Run without the motor controller
    #[arg(long)]
    no_serial: bool,

    /// Replay speed in frames per second
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", autotrack_rs::NAME, autotrack_rs::VERSION);

    let mut config = match args.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if let Some(port) = args.port {
        config.serial.port = port;
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    if args.no_serial {
        config.serial.enabled = false;
    }

    // Malformed configuration stops us before anything is opened.
    config.validate()?;
    let geometry = config.geometry()?;
    let control = config.control()?;

    info!(
        "Frame {}x{}, threshold={}px, gain={}, max_step={}deg, interval={:?}",
        geometry.width(),
        geometry.height(),
        control.threshold,
        control.smooth_factor,
        control.max_rotate_step,
        control.send_interval
    );

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }

    let source = ReplaySource::open(&args.replay)
        .with_context(|| format!("Cannot open replay {}", args.replay.display()))?
        .with_fps(args.fps);

    let channel = if config.serial.enabled {
        CommandChannel::connect(&config.serial.connector())
    } else {
        let mut channel = CommandChannel::new();
        channel.disable();
        channel
    };

    let mut pipeline = TrackingPipeline::new(
        source,
        TrackingController::new(control, geometry),
        channel,
    )
    .with_mirror(config.frame.mirror);

    info!("Press Ctrl-C to quit");
    let outcome = pipeline.run(&running, |report| trace!(?report, "cycle"));

    let summary = pipeline.summary();
    info!(
        frames = summary.frames,
        with_target = summary.frames_with_target,
        issued = summary.commands_issued,
        delivered = summary.commands_delivered,
        failed = summary.send_failures,
        "Run summary"
    );

    let result = match outcome {
        Ok(_) => Ok(()),
        Err(RunError::SourceExhausted { frames }) => {
            info!("Replay finished after {} frame(s)", frames);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    };

    info!("Exiting...");
    result
}
