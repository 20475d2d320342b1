//! `foldview` - inspect fold layouts and simulate playback from the shell.
//!
//! Usage:
//!   foldview layout --fold gate-fold --width 11 --height 17
//!   foldview frames --fold tri-fold-roll --fps 30 --seconds 4
//!   foldview schema
//!
//! `--options <preset.toml>` seeds every subcommand; sheet flags override it.
//! Logging follows `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use foldview::{FoldEngine, FoldType, Options, Orientation};
use serde_json::json;

/// Fold preview core command line.
#[derive(Parser, Debug)]
#[command(name = "foldview", version, about, long_about = None)]
struct Cli {
    /// Options preset (TOML). Missing fields use defaults.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the panel layout as JSON.
    Layout(SheetArgs),
    /// Ping-pong the fold at a fixed frame rate and print one JSON line
    /// per frame.
    Frames {
        #[command(flatten)]
        sheet: SheetArgs,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 30)]
        fps: u32,
        /// Simulated duration.
        #[arg(long, default_value_t = 4.0)]
        seconds: f32,
    },
    /// Print the options JSON schema.
    Schema,
}

/// Sheet overrides on top of the preset.
#[derive(Args, Debug)]
struct SheetArgs {
    /// Fold topology id; unknown ids fall back to bi-fold.
    #[arg(long)]
    fold: Option<String>,
    /// `vertical` or `horizontal`.
    #[arg(long)]
    orientation: Option<Orientation>,
    /// Sheet width in inches.
    #[arg(long)]
    width: Option<f32>,
    /// Sheet height in inches.
    #[arg(long)]
    height: Option<f32>,
}

impl SheetArgs {
    fn apply(&self, options: &mut Options) {
        let sheet = &mut options.sheet;
        if let Some(id) = &self.fold {
            // Unknown ids are logged by `resolve` and fall back to bi-fold
            let (fold_type, _) = FoldType::resolve(id);
            sheet.fold_type = fold_type;
        }
        if let Some(orientation) = self.orientation {
            sheet.orientation = orientation;
        }
        if let Some(width) = self.width {
            sheet.width = width;
        }
        if let Some(height) = self.height {
            sheet.height = height;
        }
    }

    fn engine(&self, mut options: Options) -> Result<FoldEngine> {
        self.apply(&mut options);
        FoldEngine::new(options).context("failed to build fold preview")
    }
}

fn load_options(path: Option<&PathBuf>) -> Result<Options> {
    match path {
        Some(path) => Options::load(path).with_context(|| {
            format!("failed to load options from {}", path.display())
        }),
        None => Ok(Options::default()),
    }
}

fn print_layout(engine: &FoldEngine) -> Result<()> {
    let json = serde_json::to_string_pretty(engine.config())?;
    println!("{json}");
    Ok(())
}

fn print_frames(
    engine: &mut FoldEngine,
    fps: u32,
    seconds: f32,
) -> Result<()> {
    if fps == 0 {
        bail!("--fps must be positive");
    }
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("--seconds must be a non-negative number");
    }
    let dt = Duration::from_secs_f64(1.0 / f64::from(fps));
    let frames = (seconds * fps as f32).round() as usize;
    let fold_type = engine.tree().fold_type();

    engine.play();
    for frame in 0..=frames {
        let progress = engine.progress();
        let motion = engine.animator().motion();
        let angles: Vec<f32> = engine
            .tree()
            .hinges()
            .map(|hinge| motion.pose(fold_type, &hinge, progress).angle)
            .collect();
        let bounds = engine.tree().world_bounds();
        let line = json!({
            "frame": frame,
            "progress": progress,
            "angles": angles,
            "bounds": { "min": bounds.min, "max": bounds.max },
        });
        println!("{line}");
        let _ = engine.tick(dt);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let cli = Cli::parse();
    let options = load_options(cli.options.as_ref())?;

    match cli.command {
        Command::Layout(sheet) => print_layout(&sheet.engine(options)?),
        Command::Frames {
            sheet,
            fps,
            seconds,
        } => print_frames(&mut sheet.engine(options)?, fps, seconds),
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())?;
            println!("{schema}");
            Ok(())
        }
    }
}
