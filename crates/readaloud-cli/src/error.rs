//! CLI-specific error types and mappings.
//!
//! Library errors (`SettingsError`, `EngineError`) are folded into
//! [`CliError`] so `main` can pick an exit code.

use readaloud_core::SettingsError;
use readaloud_speech::EngineError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No speech engine is available on this host.
    #[error("Speech synthesis is not available: {0}")]
    Unavailable(String),

    /// The speech engine could not be started.
    #[error("Speech engine error: {0}")]
    Engine(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 64: usage error
    /// - 69: service unavailable
    /// - 71: OS error
    /// - 74: IO error
    /// - 78: configuration error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 64,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Engine(_) => 71,      // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownEngine(_) => Self::Config(err.to_string()),
            EngineError::NotInstalled(_) => Self::Unavailable(err.to_string()),
            EngineError::NoRuntime => Self::Engine(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
