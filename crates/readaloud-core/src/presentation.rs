//! Derived presentation of the read-aloud control.
//!
//! The view holds no state of its own; it is recomputed from the playback
//! state and the current text on every render.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::PlaybackState;

/// Label of the start affordance.
pub const START_LABEL: &str = "Listen to Analysis";

/// Label of the stop affordance.
pub const STOP_LABEL: &str = "Stop";

/// Visual emphasis of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlStyle {
    /// Low-emphasis button.
    Ghost,
    /// Destructive / interrupting action.
    Danger,
}

/// What the host should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "control")]
pub enum ControlView {
    /// Capability absent: render nothing.
    Hidden,

    /// Offer to start speaking; disabled when there is no text.
    Start { enabled: bool },

    /// Offer to stop the current utterance.
    Stop,
}

impl ControlView {
    /// Compute the view for `state` given the host's current `text`.
    #[must_use]
    pub const fn derive(state: PlaybackState, text: &str) -> Self {
        match state {
            PlaybackState::NotSupported => Self::Hidden,
            PlaybackState::Idle => Self::Start {
                enabled: !text.is_empty(),
            },
            PlaybackState::Speaking { .. } => Self::Stop,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether activating the control does anything.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self {
            Self::Hidden => false,
            Self::Start { enabled } => *enabled,
            Self::Stop => true,
        }
    }

    #[must_use]
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Start { .. } => Some(START_LABEL),
            Self::Stop => Some(STOP_LABEL),
        }
    }

    #[must_use]
    pub const fn icon(&self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Start { .. } => Some("🔊"),
            Self::Stop => Some("⏹"),
        }
    }

    #[must_use]
    pub const fn style(&self) -> Option<ControlStyle> {
        match self {
            Self::Hidden => None,
            Self::Start { .. } => Some(ControlStyle::Ghost),
            Self::Stop => Some(ControlStyle::Danger),
        }
    }
}

/// Text rendering for terminal hosts: `[🔊 Listen to Analysis]`.
///
/// A disabled control is wrapped in parentheses; `Hidden` renders as nothing.
impl fmt::Display for ControlView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(icon), Some(label)) = (self.icon(), self.label()) else {
            return Ok(());
        };
        if self.is_enabled() {
            write!(f, "[{icon} {label}]")
        } else {
            write!(f, "({icon} {label})")
        }
    }
}
