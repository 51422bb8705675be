//! CLI Module
//!
//! Command-line driver: loads WAV files into an in-process host and
//! runs edit scripts against them through the control surface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Splicer - paired-buffer sample editor
#[derive(Parser, Debug)]
#[command(name = "splicer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a JSON edit script against two WAV files
    #[command(name = "apply")]
    Apply {
        /// WAV file loaded as buffer A
        #[arg(long)]
        a: PathBuf,

        /// WAV file loaded as buffer B
        #[arg(long)]
        b: PathBuf,

        /// JSON edit script to run
        #[arg(long)]
        script: PathBuf,

        /// Where to write buffer A afterwards (defaults to in place)
        #[arg(long)]
        out_a: Option<PathBuf>,

        /// Where to write buffer B afterwards (defaults to in place)
        #[arg(long)]
        out_b: Option<PathBuf>,
    },

    /// Print frame counts and rates for two WAV files
    #[command(name = "info")]
    Info {
        /// WAV file loaded as buffer A
        #[arg(long)]
        a: PathBuf,

        /// WAV file loaded as buffer B
        #[arg(long)]
        b: PathBuf,
    },
}
