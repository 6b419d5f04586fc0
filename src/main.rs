// Copyright 2026 Slotpulse Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod acquisition;
mod cli;
mod consolidation;
mod error;
mod model;
mod snapshot;

#[derive(Parser)]
#[command(
    name = "slotpulse",
    about = "Slotpulse — district availability snapshot pipeline",
    version,
    after_help = "Run 'slotpulse <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll every configured district once and persist a timestamped snapshot
    Harvest {
        /// District id configuration file
        #[arg(long, default_value = acquisition::districts::DEFAULT_CONFIG_PATH)]
        districts: PathBuf,
        /// Directory that snapshot folders are created under
        #[arg(long, default_value = snapshot::DEFAULT_DUMP_ROOT)]
        dump_root: PathBuf,
        /// Upstream API base URL
        #[arg(long, default_value = acquisition::DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Merge every historical snapshot into one combined dataset
    Aggregate {
        /// Directory containing snapshot folders
        #[arg(long, default_value = snapshot::DEFAULT_DUMP_ROOT)]
        dump_root: PathBuf,
        /// Combined dataset output path
        #[arg(long, default_value = consolidation::DEFAULT_COMBINED_PATH)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let directive = if cli.verbose {
        "slotpulse=debug"
    } else {
        "slotpulse=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .init();

    let result = match cli.command {
        Commands::Harvest {
            districts,
            dump_root,
            base_url,
        } => cli::harvest_cmd::run(districts, dump_root, base_url).await,
        Commands::Aggregate { dump_root, out } => cli::aggregate_cmd::run(dump_root, out).await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
