mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use kinema_core::Quality;

#[derive(Parser)]
#[command(
    name = "kinema",
    version,
    about = "Kinema — programmatic motion graphics",
    long_about = "Kinema renders animated explainer videos from scene scripts.\nScenes are built in code, validated before a single frame is drawn,\nand rendered deterministically at any quality tier."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene (or the whole catalog) to a video file
    Render {
        /// Name of the scene to render (see `kinema list`)
        #[arg()]
        scene: Option<String>,

        /// Render every catalog scene to its own file
        #[arg(long)]
        all: bool,

        /// Render the whole catalog as one combined video
        #[arg(long)]
        combined: bool,

        /// Quality tier: low, medium, high
        #[arg(short, long)]
        quality: Option<Quality>,

        /// Output directory (default from kinema.toml, falls back to ./output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: mp4, gif, png
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List the scene catalog with durations
    List,

    /// Construct and validate scenes without rendering
    Check {
        /// Scene to check (default: the whole catalog)
        #[arg()]
        scene: Option<String>,
    },

    /// Print a scene's timeline, or its sampled state at a frame
    Inspect {
        /// Scene to inspect
        #[arg()]
        scene: String,

        /// Sample the visual state at this frame index instead of
        /// summarizing the timeline
        #[arg(long)]
        frame: Option<u64>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version and engine info
    Info,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            all,
            combined,
            quality,
            output,
            format,
        } => commands::render(scene, all, combined, quality, output, format),
        Commands::List => commands::list(),
        Commands::Check { scene } => commands::check(scene),
        Commands::Inspect { scene, frame, json } => commands::inspect(&scene, frame, json),
        Commands::Info => commands::info(),
    }
}
