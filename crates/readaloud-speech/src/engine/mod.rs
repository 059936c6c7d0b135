//! Speech engine adapters implementing [`SpeechSynthesisPort`].
//!
//! | Engine                  | Capability | Backing                               |
//! |-------------------------|------------|---------------------------------------|
//! | [`CommandSpeechEngine`] | yes        | `spd-say`, `espeak-ng`, `espeak`, `say` |
//! | [`UnsupportedEngine`]   | no         | nothing                               |
//!
//! [`detect_engine`] picks one for the current host.

mod command;
mod unsupported;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use readaloud_core::{ReadAloudSettings, SpeechSynthesisPort};

use crate::error::EngineError;

pub use command::CommandSpeechEngine;
pub use unsupported::UnsupportedEngine;

/// A system speech program this crate knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechProgram {
    /// speech-dispatcher client (Linux desktops).
    SpdSay,
    /// eSpeak NG.
    EspeakNg,
    /// Classic eSpeak.
    Espeak,
    /// macOS `say`.
    Say,
}

impl SpeechProgram {
    /// Search order when nothing is configured.
    pub const SEARCH_ORDER: [Self; 4] = [Self::SpdSay, Self::EspeakNg, Self::Espeak, Self::Say];

    /// Executable name.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            Self::SpdSay => "spd-say",
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
            Self::Say => "say",
        }
    }

    /// Arguments that speak `text` in `language` and block until done.
    ///
    /// `say` has no language flag; callers log the tag instead.
    #[must_use]
    pub fn speak_args(self, text: &str, language: &str) -> Vec<String> {
        match self {
            Self::SpdSay => vec![
                "--wait".to_string(),
                "--language".to_string(),
                language.to_string(),
                "--".to_string(),
                text.to_string(),
            ],
            Self::EspeakNg | Self::Espeak => vec![
                "-v".to_string(),
                language.to_string(),
                "--".to_string(),
                text.to_string(),
            ],
            Self::Say => vec!["--".to_string(), text.to_string()],
        }
    }

    /// Extra command that silences the engine process-wide, if killing the
    /// child is not enough.
    ///
    /// `spd-say` only submits to the speech-dispatcher daemon, so the daemon
    /// must be told to cancel.
    #[must_use]
    pub const fn cancel_args(self) -> Option<&'static [&'static str]> {
        match self {
            Self::SpdSay => Some(&["--cancel"]),
            Self::EspeakNg | Self::Espeak | Self::Say => None,
        }
    }

    /// Whether the program understands a language tag.
    #[must_use]
    pub const fn accepts_language(self) -> bool {
        !matches!(self, Self::Say)
    }

    /// Locate the executable on `PATH`.
    #[must_use]
    pub fn locate(self) -> Option<PathBuf> {
        which::which(self.binary()).ok()
    }
}

impl fmt::Display for SpeechProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for SpeechProgram {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEARCH_ORDER
            .into_iter()
            .find(|p| p.binary() == s)
            .ok_or_else(|| EngineError::UnknownEngine(s.to_string()))
    }
}

/// Choose the speech engine for this host.
///
/// A configured engine must be installed; otherwise the first program found
/// in [`SpeechProgram::SEARCH_ORDER`] wins. When nothing is found the returned
/// engine reports no capability, so the control renders nothing.
///
/// Must be called from within a Tokio runtime.
pub fn detect_engine(
    settings: &ReadAloudSettings,
) -> Result<Arc<dyn SpeechSynthesisPort>, EngineError> {
    if let Some(ref name) = settings.engine {
        let program: SpeechProgram = name.parse()?;
        let path = program
            .locate()
            .ok_or_else(|| EngineError::NotInstalled(name.clone()))?;
        tracing::info!(engine = %program, path = %path.display(), "Using configured speech engine");
        return Ok(Arc::new(CommandSpeechEngine::new(program, path)?));
    }

    for program in SpeechProgram::SEARCH_ORDER {
        if let Some(path) = program.locate() {
            tracing::info!(engine = %program, path = %path.display(), "Detected speech engine");
            return Ok(Arc::new(CommandSpeechEngine::new(program, path)?));
        }
    }

    tracing::warn!("No speech synthesis program found on PATH");
    Ok(Arc::new(UnsupportedEngine))
}
