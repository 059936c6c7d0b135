//! Terminal host for the read-aloud control.
//!
//! The `readaloud` binary is the composition root: it loads `.env`, builds
//! [`ReadAloudSettings`](readaloud_core::ReadAloudSettings) from the
//! environment and flags, picks a speech engine and hands it to the
//! controller. Handlers live in [`handlers`]; everything they decide about
//! playback comes from `readaloud-speech`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary only.
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod utils;

pub use commands::{Commands, TextInput};
pub use error::CliError;
pub use parser::Cli;
