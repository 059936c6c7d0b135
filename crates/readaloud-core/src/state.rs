//! Playback state machine.
//!
//! ```text
//!   NotSupported                 (capability absent at mount; terminal)
//!
//!   Idle ──submit──▶ Speaking ──ended/errored/stop──▶ Idle
//!                      │  ▲
//!                      └──┘ submit (interrupt and replace)
//! ```
//!
//! Transitions are pure so they can be tested without an engine. Events are
//! matched against the request currently being spoken; anything else is a
//! stale notification from a superseded request and is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{RequestId, SpeechEvent, SpeechEventKind};

/// State of the read-aloud control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum PlaybackState {
    /// The host has no speech-synthesis capability.
    NotSupported,

    /// Nothing is being spoken.
    Idle,

    /// `request` has been submitted and has not terminated yet.
    Speaking { request: RequestId },
}

impl PlaybackState {
    /// State at mount time.
    #[must_use]
    pub const fn initial(supported: bool) -> Self {
        if supported {
            Self::Idle
        } else {
            Self::NotSupported
        }
    }

    /// A new request was handed to the engine.
    #[must_use]
    pub const fn on_submit(self, request: RequestId) -> Self {
        match self {
            Self::NotSupported => Self::NotSupported,
            Self::Idle | Self::Speaking { .. } => Self::Speaking { request },
        }
    }

    /// The user cancelled playback.
    #[must_use]
    pub const fn on_stop(self) -> Self {
        match self {
            Self::Speaking { .. } => Self::Idle,
            other => other,
        }
    }

    /// Apply an engine notification.
    #[must_use]
    pub const fn on_event(self, event: &SpeechEvent) -> Self {
        let Self::Speaking { request } = self else {
            return self;
        };
        if request.value() != event.request.value() {
            return self;
        }
        match event.kind {
            SpeechEventKind::Started => self,
            SpeechEventKind::Ended | SpeechEventKind::Errored(_) => Self::Idle,
        }
    }

    /// Whether `event` belongs to the request currently being spoken.
    #[must_use]
    pub fn is_current(&self, event: &SpeechEvent) -> bool {
        self.current_request() == Some(event.request)
    }

    #[must_use]
    pub const fn current_request(&self) -> Option<RequestId> {
        match self {
            Self::Speaking { request } => Some(*request),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_speaking(&self) -> bool {
        matches!(self, Self::Speaking { .. })
    }

    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::NotSupported)
    }

    /// Short lowercase label for logs and status output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotSupported => "not_supported",
            Self::Idle => "idle",
            Self::Speaking { .. } => "speaking",
        }
    }
}
