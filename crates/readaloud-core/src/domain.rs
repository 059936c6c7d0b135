//! Domain values exchanged between the controller and speech engines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::clean_markdown;

/// BCP-47 tag used when the host does not supply one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Identity of a single utterance request.
///
/// Allocated by the controller, carried by every [`SpeechEvent`] so that
/// notifications from a superseded request can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// The first id a controller hands out.
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

/// Input the host supplies to the read-aloud control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadAloudProps {
    /// Display text to speak. Start is disabled while this is empty.
    pub text: String,

    /// BCP-47 language tag, passed to the engine unmodified.
    pub language: String,
}

impl ReadAloudProps {
    /// Props with the default language.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Replace the language tag.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Whether there is any text at all to speak.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

impl Default for ReadAloudProps {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// One immutable request to synthesize speech.
///
/// Built fresh on every start action; the cleaned text is derived once at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRequest {
    id: RequestId,
    raw_text: String,
    language: String,
    cleaned_text: String,
}

impl UtteranceRequest {
    pub fn new(id: RequestId, raw_text: impl Into<String>, language: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let cleaned_text = clean_markdown(&raw_text);
        Self {
            id,
            raw_text,
            language: language.into(),
            cleaned_text,
        }
    }

    /// Build a request from the current props.
    #[must_use]
    pub fn from_props(id: RequestId, props: &ReadAloudProps) -> Self {
        Self::new(id, props.text.clone(), props.language.clone())
    }

    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Text with markdown punctuation removed; this is what gets spoken.
    #[must_use]
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned_text
    }
}

/// Why an utterance stopped without finishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum SpeechFailure {
    /// Cancelled before the end, by us or by another user of the engine.
    Interrupted,

    /// The engine failed to produce audio.
    Synthesis(String),
}

impl fmt::Display for SpeechFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted => write!(f, "interrupted"),
            Self::Synthesis(msg) => write!(f, "synthesis failed: {msg}"),
        }
    }
}

/// Lifecycle notification kinds delivered by a speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpeechEventKind {
    /// Audible playback began.
    Started,

    /// Playback completed naturally.
    Ended,

    /// Playback stopped with a failure.
    Errored(SpeechFailure),
}

/// A lifecycle notification tagged with the request it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechEvent {
    pub request: RequestId,
    pub kind: SpeechEventKind,
}

impl SpeechEvent {
    #[must_use]
    pub const fn started(request: RequestId) -> Self {
        Self {
            request,
            kind: SpeechEventKind::Started,
        }
    }

    #[must_use]
    pub const fn ended(request: RequestId) -> Self {
        Self {
            request,
            kind: SpeechEventKind::Ended,
        }
    }

    #[must_use]
    pub const fn errored(request: RequestId, failure: SpeechFailure) -> Self {
        Self {
            request,
            kind: SpeechEventKind::Errored(failure),
        }
    }

    #[must_use]
    pub const fn interrupted(request: RequestId) -> Self {
        Self::errored(request, SpeechFailure::Interrupted)
    }

    /// Whether this event ends the request it belongs to.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self.kind, SpeechEventKind::Started)
    }
}
