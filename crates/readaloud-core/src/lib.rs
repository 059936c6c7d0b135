//! Core domain for readaloud.
//!
//! Holds everything that does not touch a real speech engine: the markdown
//! sanitizer, the playback state machine, the speech port trait, the derived
//! control view and settings. Adapters live in `readaloud-speech`.
//!
//! ```text
//! Host:        readaloud-cli
//!                   ↓
//! Adapters:   readaloud-speech  (controller, engines)
//!                   ↓
//! Core:       readaloud-core    (text, state, ports, presentation, settings)
//! ```

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod presentation;
pub mod settings;
pub mod state;
pub mod text;

pub use domain::{
    DEFAULT_LANGUAGE, ReadAloudProps, RequestId, SpeechEvent, SpeechEventKind, SpeechFailure,
    UtteranceRequest,
};
pub use ports::{SpeechEventSender, SpeechPortError, SpeechSynthesisPort};
pub use presentation::{ControlStyle, ControlView};
pub use settings::{
    ENGINE_ENV_VAR, KNOWN_ENGINES, LANGUAGE_ENV_VAR, ReadAloudSettings, SettingsError,
    SettingsUpdate, validate_settings,
};
pub use state::PlaybackState;
pub use text::{clean_for_speech, clean_markdown, is_speech_whitespace};

#[cfg(test)]
use mockall as _;
#[cfg(test)]
use serde_json as _;
