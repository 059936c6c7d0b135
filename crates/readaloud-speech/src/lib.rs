//! Read-aloud controller and speech engine adapters.
//!
//! [`ReadAloudController`] is the control itself: it owns the playback state,
//! turns start/stop into engine calls and applies the engine's lifecycle
//! events. Engines implement
//! [`SpeechSynthesisPort`](readaloud_core::SpeechSynthesisPort); use
//! [`detect_engine`] to pick the one available on this host.

#![deny(unused_crate_dependencies)]

pub mod controller;
pub mod engine;
pub mod error;

pub use controller::ReadAloudController;
pub use engine::{CommandSpeechEngine, SpeechProgram, UnsupportedEngine, detect_engine};
pub use error::EngineError;

#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
