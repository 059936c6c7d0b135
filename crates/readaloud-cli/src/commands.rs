//! Subcommands of the `readaloud` binary.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Where the text to read comes from.
///
/// With neither a positional text nor `--file`, text is read from stdin.
#[derive(Debug, Clone, Default, Args)]
pub struct TextInput {
    /// Text to read (markdown is stripped)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Read text aloud. Press Enter to stop, Ctrl-C to quit
    Speak {
        #[command(flatten)]
        input: TextInput,

        /// BCP-47 language tag passed to the engine (e.g. "en-US")
        #[arg(short, long, value_name = "TAG")]
        language: Option<String>,

        /// Speech program to use (spd-say, espeak-ng, espeak, say)
        #[arg(short, long, value_name = "NAME")]
        engine: Option<String>,
    },

    /// Print the text exactly as it would be spoken
    Clean {
        #[command(flatten)]
        input: TextInput,
    },

    /// Report which speech engine is available
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Check this speech program instead of probing
        #[arg(short, long, value_name = "NAME")]
        engine: Option<String>,
    },
}
