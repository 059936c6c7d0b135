//! Speech synthesis port — the platform text-to-speech capability.
//!
//! The host engine is a process-wide resource. Implementations must accept
//! that another consumer can cancel or replace what they are saying, and
//! report that as [`SpeechFailure::Interrupted`](crate::SpeechFailure).

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::{SpeechEvent, UtteranceRequest};

/// Channel on which an engine reports lifecycle events back to the controller.
pub type SpeechEventSender = mpsc::UnboundedSender<SpeechEvent>;

/// Errors a speech engine can return synchronously from [`SpeechSynthesisPort::speak`].
#[derive(Debug, Clone, Error)]
pub enum SpeechPortError {
    /// The host has no speech synthesis capability.
    #[error("Speech synthesis is not supported on this host")]
    Unsupported,

    /// The engine process could not be started.
    #[error("Failed to start speech engine: {0}")]
    Spawn(String),

    /// The engine refused the request.
    #[error("Speech engine rejected the request: {0}")]
    Rejected(String),
}

/// Port trait for the platform speech engine.
///
/// `speak` is fire-and-forget: it returns once the request is handed over,
/// and later sends `Started` followed by exactly one of `Ended` or `Errored`
/// on `events`, each tagged with `request.id()`.
pub trait SpeechSynthesisPort: Send + Sync {
    /// Whether the host offers speech synthesis at all.
    fn is_supported(&self) -> bool;

    /// Submit `request.cleaned_text()` in `request.language()`.
    fn speak(
        &self,
        request: &UtteranceRequest,
        events: SpeechEventSender,
    ) -> Result<(), SpeechPortError>;

    /// Cancel whatever the engine is currently saying.
    fn cancel(&self);

    /// Short engine name for diagnostics.
    fn name(&self) -> &'static str;
}
