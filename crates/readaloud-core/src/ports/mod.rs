//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No process, audio device or platform types in any signature
//! - Lifecycle notifications travel over a channel, never through callbacks

pub mod speech;

pub use speech::{SpeechEventSender, SpeechPortError, SpeechSynthesisPort};
