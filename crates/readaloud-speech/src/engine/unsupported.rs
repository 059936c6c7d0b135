use readaloud_core::{SpeechEventSender, SpeechPortError, SpeechSynthesisPort, UtteranceRequest};

/// Engine for hosts without any speech synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedEngine;

impl SpeechSynthesisPort for UnsupportedEngine {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak(
        &self,
        _request: &UtteranceRequest,
        _events: SpeechEventSender,
    ) -> Result<(), SpeechPortError> {
        Err(SpeechPortError::Unsupported)
    }

    fn cancel(&self) {}

    fn name(&self) -> &'static str {
        "none"
    }
}
