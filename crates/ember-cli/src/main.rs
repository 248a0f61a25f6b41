//! CLI frontend for the Ember dialog and mini-game engines.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ember",
    about = "Ember: branching NPC dialogs and mini-games in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate every dialog tree and puzzle deck
    Check {
        /// Content directory holding dialogs/ and puzzles/
        #[arg(short, long, default_value = "content")]
        dir: PathBuf,
    },

    /// Talk to an NPC and save the resulting stats
    Talk {
        /// NPC id (file name under dialogs/, without .json)
        npc: String,

        /// Content directory holding dialogs/ and puzzles/
        #[arg(short, long, default_value = "content")]
        dir: PathBuf,

        /// Checkpoint file
        #[arg(long, env = "EMBER_PROGRESS", default_value = "ember-progress.json")]
        progress: PathBuf,

        /// RNG seed for profession tie-breaking
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Play a mini-game
    Play {
        /// Game kind: cipher, anomaly, matching, prioritization, route, incident, bughunt
        kind: String,

        /// Content directory holding dialogs/ and puzzles/
        #[arg(short, long, default_value = "content")]
        dir: PathBuf,

        /// RNG seed for scrambled ciphers
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Fire timed transitions immediately instead of waiting
        #[arg(long)]
        no_delay: bool,
    },

    /// Inspect or reset the saved checkpoint
    Progress {
        #[command(subcommand)]
        action: ProgressAction,

        /// Checkpoint file
        #[arg(long, env = "EMBER_PROGRESS", default_value = "ember-progress.json")]
        progress: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Show the scene, stats and profession
    Show {
        /// RNG seed for profession tie-breaking
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Start over from scene 1 with zero stats
    Reset,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Talk {
            npc,
            dir,
            progress,
            seed,
        } => commands::talk::run(&dir, &npc, &progress, seed),
        Commands::Play {
            kind,
            dir,
            seed,
            no_delay,
        } => commands::play::run(&dir, &kind, seed, no_delay),
        Commands::Progress { action, progress } => match action {
            ProgressAction::Show { seed } => commands::progress::show(&progress, seed),
            ProgressAction::Reset => commands::progress::reset(&progress),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
