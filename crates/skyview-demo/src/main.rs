//! Headless host for the sky engine.
//!
//! Loads configuration, runs a fixed number of frames at a steady frame rate
//! while advancing the observation clock, and prints every frame as one JSON
//! line on stdout. Logs go to stderr.
//!
//! Run with: `cargo run -p skyview-demo -- --target jupiter --frames 90`

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use skyview_catalog::Catalog;
use skyview_config::{CliArgs, Config, ConfigError, default_config_dir};
use skyview_engine::{EngineSettings, SkyEngine};
use skyview_ephemeris::{Equatorial, ObserverLocation};
use skyview_targeting::TargetId;
use skyview_view::ViewInput;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "skyview-demo", about = "Print sky engine frames as JSON lines")]
struct DemoArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Frames per second of the simulated host loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Observation time (RFC 3339). Defaults to now.
    #[arg(long)]
    time: Option<DateTime<Utc>>,

    /// Hunt target: a body (sun, moon, mars, jupiter) or a star name.
    /// Simulated device orientation keeps the view pointed at it.
    #[arg(long)]
    target: Option<TargetId>,

    /// Catalog file to use instead of the bundled bright stars.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Only print frames that carry lock events.
    #[arg(long)]
    events_only: bool,
}

fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let config = match load_config(&args.common) {
        Ok(config) => config,
        Err(err) => {
            // Logging is not up yet.
            eprintln!("skyview-demo: {err}");
            return ExitCode::FAILURE;
        }
    };
    let log_dir = args.common.config.clone().or_else(|| default_config_dir().ok());
    skyview_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &DemoArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };
    let location = ObserverLocation::new(config.observer.latitude_deg, config.observer.longitude_deg);
    let start = args.time.unwrap_or_else(Utc::now);
    let fps = args.fps.max(1);
    let dt = Duration::from_secs(1) / fps;

    info!(
        "Observer: lat={:.2} lon={:.2} | {} stars | {}x{} {:?}",
        location.latitude_deg,
        location.longitude_deg,
        catalog.len(),
        config.display.width,
        config.display.height,
        config.view.projection,
    );

    let mut engine = SkyEngine::new(catalog, EngineSettings::from(config), start, location);

    if let Some(target) = &args.target {
        if target.resolve(engine.catalog(), start).is_none() {
            info!("Target {target} is not in the catalog; it will never lock");
        }
        engine.push(ViewInput::SetSensorMode(true));
        engine.start_hunt(target.clone());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for n in 0..args.frames {
        let now = start + chrono::Duration::from_std(dt * n)?;
        engine.observe(now, location);
        if let Some(eq) = args.target.as_ref().and_then(|t| t.resolve(engine.catalog(), now)) {
            engine.push(aim_device_at(eq));
        }
        let frame = engine.frame(dt);
        for event in &frame.events {
            info!("Lock event: {} -> {:?}", event.target_id, event.state);
        }
        if args.events_only && frame.events.is_empty() {
            continue;
        }
        serde_json::to_writer(&mut out, &frame)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Orientation reading of a device held so that `eq` is at the center of
/// the view.
fn aim_device_at(eq: Equatorial) -> ViewInput {
    ViewInput::Orientation {
        alpha: eq.longitude_deg(),
        beta: eq.latitude_deg() + 90.0,
        gamma: 0.0,
    }
}
