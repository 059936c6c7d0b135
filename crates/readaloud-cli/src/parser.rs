//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Read text aloud through the system speech engine.
#[derive(Parser)]
#[command(name = "readaloud")]
#[command(about = "Read markdown text aloud with the system speech engine")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
