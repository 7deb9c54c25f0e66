//! Lineup CLI - relay and league team composition from swimmer data.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use lineup::{Gender, GenderPolicy, RelayRuleId};
use std::path::PathBuf;
use std::process::ExitCode;

/// Lineup - relay and league team composition for swim clubs
#[derive(Parser, Debug)]
#[command(name = "lineup")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (.toml, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress solver progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank the fastest relay teams
    Relay {
        /// Relay identifier: 4x50VZ, 4x100VZ, 4x200VZ, 4x50PZ or 4x100PZ
        #[arg(short, long)]
        rule: RelayRuleId,

        /// Team gender: men, women or mixed
        #[arg(short, long, default_value = "mixed")]
        gender: GenderPolicy,

        /// Number of teams to list (default: from config, 6)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Swimmer data (JSON array of swimmer records)
        swimmers: PathBuf,
    },

    /// Pick the league roster and event nominations
    League {
        /// Pool length in metres: 25 or 50 (default: from config, 50)
        #[arg(short, long)]
        pool: Option<u16>,

        /// Comma-separated events (default: from config, the 16 league events)
        #[arg(short, long, value_delimiter = ',')]
        events: Vec<String>,

        /// Roster size (default: from config, 16)
        #[arg(long)]
        roster: Option<usize>,

        /// Stop the search after this many nodes
        #[arg(long)]
        node_limit: Option<u64>,

        /// Swimmer data (JSON array of swimmer records)
        swimmers: PathBuf,
    },

    /// Score a single swim in FINA points
    Points {
        /// Event, e.g. 100K or "100m Freestyle"
        event: String,

        /// Time as m:ss.cc or s.cc
        time: String,

        /// Swimmer gender: M or F
        #[arg(short, long, default_value = "M")]
        gender: Gender,

        /// Pool length in metres: 25 or 50 (default: from config, 50)
        #[arg(short, long)]
        pool: Option<u16>,
    },

    /// List the configured league events
    Events,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = cli::Context::load(args.config.as_deref(), args.json, args.quiet).and_then(|ctx| {
        match args.command {
            Commands::Relay {
                rule,
                gender,
                top,
                swimmers,
            } => cli::relay::execute(&ctx, rule, gender, top, &swimmers),

            Commands::League {
                pool,
                events,
                roster,
                node_limit,
                swimmers,
            } => cli::league::execute(ctx, pool, &events, roster, node_limit, &swimmers),

            Commands::Points {
                event,
                time,
                gender,
                pool,
            } => cli::points::execute(&ctx, &event, &time, gender, pool),

            Commands::Events => cli::points::list_events(&ctx),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
