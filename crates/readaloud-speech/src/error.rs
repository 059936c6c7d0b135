//! Speech engine setup errors.

/// Errors that can occur while choosing or building a speech engine.
///
/// Playback failures are not represented here: they are reported as
/// [`SpeechFailure`](readaloud_core::SpeechFailure) events and never leave
/// the controller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configured program is not one this crate can drive.
    #[error("Unknown speech engine '{0}'")]
    UnknownEngine(String),

    /// The configured program is not installed.
    #[error("Speech engine '{0}' was not found on PATH")]
    NotInstalled(String),

    /// Engines spawn child processes and must be created inside a Tokio runtime.
    #[error("Speech engines must be created from within a Tokio runtime")]
    NoRuntime,
}
