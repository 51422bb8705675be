//! Splicer CLI - paired-buffer sample editing
//!
//! Command-line driver for cut/swap/shuffle edit scripts over WAV
//! file pairs.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;

use splicer::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Splicer v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Splicer v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            a,
            b,
            script,
            out_a,
            out_b,
        } => commands::apply(&a, &b, &script, out_a.as_deref(), out_b.as_deref()),
        Commands::Info { a, b } => commands::print_info(&a, &b),
    }
}
