//! Trail3D Terminal - spinning figures with fading trails
//!
//! Controls:
//!   - Space: pause
//!   - 1-4: donut, cube, bridge, torus-cube
//!   - +/- or mouse wheel: zoom
//!   - s/S t/T g/G: speed, trail length, fade slope
//!   - x/X y/Y z/Z: per-axis speed
//!   - c/b: cycle figure and background colors
//!   - f: FPS counter
//!   - Q/ESC: quit

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Env, Target};
use std::fs::File;
use std::path::PathBuf;
use trail3d_core::{FigureKind, Rgb, Session, Sliders};
use trail3d_terminal::input::KEY_HELP;
use trail3d_terminal::{CellMode, TerminalApp};

#[derive(Parser)]
#[command(
    name = "trail3d-terminal",
    version,
    about = "Spinning 3D figures with fading motion trails, in the terminal",
    after_help = KEY_HELP
)]
struct Cli {
    /// Figure to start with: donut, cube, bridge or torus-cube
    #[arg(short, long, default_value = "donut")]
    figure: FigureKind,

    /// Speed slider (0-100, value / 10 is the speed multiplier)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    speed: u32,

    /// Trail length (0-20)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(0..=20))]
    trail: u32,

    /// Gamma slider (0-100, value / 100 is the fade slope)
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(0..=100))]
    gamma: u32,

    /// X axis speed slider (0-100, value / 100 radians per tick)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    axis_x: u32,

    /// Y axis speed slider (0-100)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    axis_y: u32,

    /// Z axis speed slider (0-100)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=100))]
    axis_z: u32,

    /// Zoom slider (0-4500, value / 100 is the zoom factor)
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(0..=4500))]
    zoom: u32,

    /// Figure color as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    fg: Rgb,

    /// Background color as #rrggbb
    #[arg(long, default_value = "#000000")]
    bg: Rgb,

    /// Show the FPS counter
    #[arg(long)]
    fps: bool,

    /// One shaded character per pixel instead of truecolor half blocks
    #[arg(long)]
    ascii: bool,

    /// Set log level
    #[arg(long, value_enum, env = "TRAIL3D_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Write logs to this file; without it logging is off while the screen is taken
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder
                .filter_level(cli.log_level.into())
                .target(Target::Pipe(Box::new(file)));
        }
        // stderr shares the alternate screen
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    log::info!("Trail3D terminal v{} starting", env!("CARGO_PKG_VERSION"));

    let sliders = Sliders {
        speed: cli.speed,
        trail: cli.trail,
        gamma: cli.gamma,
        axis: [cli.axis_x, cli.axis_y, cli.axis_z],
        zoom: cli.zoom,
    };
    let config = sliders.config(cli.fg, cli.bg, cli.fps);
    let session = Session::new(cli.figure, sliders, config);
    let mode = if cli.ascii {
        CellMode::Ascii
    } else {
        CellMode::HalfBlock
    };

    let mut app = TerminalApp::new(session, mode).context("failed to query terminal size")?;
    app.run().context("terminal session failed")?;

    log::info!("Trail3D terminal exiting");
    Ok(())
}
