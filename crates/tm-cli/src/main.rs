//! Headless front end for Tarmac: asset validation, node listings, and
//! scripted input replays.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tarmac",
    about = "Tarmac Festival: explore the grounds, wake the Polytron 4000",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the game content and tunables come from.
#[derive(Args, Debug, Clone)]
pub struct AssetArgs {
    /// Tiled JSON map export
    #[arg(short, long, default_value = "assets/map.json")]
    map: PathBuf,

    /// Dialogue graph JSON
    #[arg(short, long, default_value = "assets/dialogue.json")]
    dialogue: PathBuf,

    /// Game configuration JSON (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the map and dialogue files
    Check {
        #[command(flatten)]
        assets: AssetArgs,
    },

    /// List dialogue nodes
    Nodes {
        /// Only show nodes of this location
        #[arg(short, long)]
        location: Option<String>,

        #[command(flatten)]
        assets: AssetArgs,
    },

    /// Drive the engine from a recorded input script
    Replay {
        /// Input script (JSON)
        script: PathBuf,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        assets: AssetArgs,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tm_engine=info,tm_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { assets } => commands::check::run(&assets),
        Commands::Nodes { location, assets } => {
            commands::nodes::run(&assets, location.as_deref())
        }
        Commands::Replay {
            script,
            json,
            assets,
        } => commands::replay::run(&assets, &script, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
