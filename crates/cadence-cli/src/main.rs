//! Cadence CLI - run and inspect fixed-timestep simulations

mod commands;
mod demo;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, run};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Fixed-timestep game loop runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo world for a number of frames
    Run {
        /// Path to a loop config file
        #[arg(long)]
        config: Option<String>,

        /// Simulate without a render surface or profilers
        #[arg(long)]
        headless: bool,

        /// Override the config's milliseconds per tick
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Number of frames to run
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Wall-clock milliseconds between frames
        #[arg(long, default_value = "16")]
        frame_ms: u64,

        /// Sleep between frames and read the real clock instead of simulating time
        #[arg(long)]
        realtime: bool,

        /// Number of moving sprites in the demo world
        #[arg(long, default_value = "32")]
        entities: usize,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective loop config, or write a default one
    Config {
        /// Config file to read (or create with --init)
        path: Option<String>,

        /// Write the default config to PATH
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            headless,
            tick_ms,
            frames,
            frame_ms,
            realtime,
            entities,
            json,
        } => run::run(run::RunArgs {
            config,
            headless,
            tick_ms,
            frames,
            frame_ms,
            realtime,
            entities,
            json,
        }),
        Commands::Config { path, init } => config::run(path.as_deref(), init),
    }
}
