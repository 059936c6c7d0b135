//! Read-aloud controller — drives one speech engine from two user actions.
//!
//! ```text
//!   Idle ──start──▶ Speaking ──(Ended | Errored | stop)──▶ Idle
//!                     │  ▲
//!                     └──┘ start (cancel, then submit again)
//! ```
//!
//! The controller owns the receiving end of the engine's event channel.
//! Hosts either await [`ReadAloudController::next_event`] in their event loop
//! or call [`ReadAloudController::pump`] once per frame.
//!
//! Dropping the controller cancels the engine, so playback never outlives
//! the control that started it.

use std::sync::Arc;

use readaloud_core::{
    ControlView, PlaybackState, ReadAloudProps, RequestId, SpeechEvent, SpeechEventKind,
    SpeechFailure, SpeechSynthesisPort, UtteranceRequest,
};
use tokio::sync::mpsc;

/// The read-aloud control.
pub struct ReadAloudController {
    /// Current state.
    state: PlaybackState,

    /// Text and language supplied by the host.
    props: ReadAloudProps,

    /// Shared platform engine.
    engine: Arc<dyn SpeechSynthesisPort>,

    /// Id handed to the next submitted utterance.
    next_request: RequestId,

    /// Cloned into every submit so the engine can report back.
    event_tx: mpsc::UnboundedSender<SpeechEvent>,

    /// Engine notifications waiting to be applied.
    event_rx: mpsc::UnboundedReceiver<SpeechEvent>,
}

impl ReadAloudController {
    /// Mount the control.
    ///
    /// Capability presence is sampled once, here.
    pub fn new(engine: Arc<dyn SpeechSynthesisPort>, props: ReadAloudProps) -> Self {
        let supported = engine.is_supported();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        if supported {
            tracing::debug!(engine = engine.name(), "Read-aloud control mounted");
        } else {
            tracing::info!(
                engine = engine.name(),
                "Speech synthesis not available, read-aloud control hidden"
            );
        }

        Self {
            state: PlaybackState::initial(supported),
            props,
            engine,
            next_request: RequestId::FIRST,
            event_tx,
            event_rx,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub const fn props(&self) -> &ReadAloudProps {
        &self.props
    }

    #[must_use]
    pub const fn is_speaking(&self) -> bool {
        self.state.is_speaking()
    }

    /// What the host should render right now.
    #[must_use]
    pub fn view(&self) -> ControlView {
        ControlView::derive(self.state, &self.props.text)
    }

    /// Replace the props after a host re-render.
    ///
    /// Playback already in progress keeps going with the old text.
    pub fn set_props(&mut self, props: ReadAloudProps) {
        self.props = props;
    }

    // ── User actions ───────────────────────────────────────────────

    /// Start speaking the current text.
    ///
    /// Returns the id of the submitted utterance, or `None` when the action
    /// was not available (no capability, no text) or the engine refused it.
    /// Engine failures are logged, never returned.
    pub fn start(&mut self) -> Option<RequestId> {
        if !self.state.is_supported() {
            tracing::debug!("Start ignored: speech synthesis not supported");
            return None;
        }
        if !self.props.has_text() {
            tracing::debug!("Start ignored: no text to speak");
            return None;
        }

        // Whatever the shared engine is saying goes first, ours or not.
        self.engine.cancel();

        let id = self.next_request;
        self.next_request = id.next();
        let request = UtteranceRequest::from_props(id, &self.props);

        tracing::debug!(
            request = %id,
            language = request.language(),
            raw_len = request.raw_text().len(),
            cleaned_len = request.cleaned_text().len(),
            "Submitting utterance"
        );

        match self.engine.speak(&request, self.event_tx.clone()) {
            Ok(()) => {
                self.set_state(self.state.on_submit(id));
                Some(id)
            }
            Err(e) => {
                tracing::error!(request = %id, error = %e, "Speech synthesis failed to start");
                self.set_state(self.state.on_stop());
                None
            }
        }
    }

    /// Stop the current utterance.
    ///
    /// Only acts while speaking; the engine is cancelled exactly once.
    pub fn stop(&mut self) {
        if !self.state.is_speaking() {
            tracing::debug!(state = self.state.label(), "Stop ignored: not speaking");
            return;
        }
        self.engine.cancel();
        self.set_state(self.state.on_stop());
    }

    /// Flip between start and stop, the way the single rendered control does.
    pub fn toggle(&mut self) {
        if self.state.is_speaking() {
            self.stop();
        } else {
            let _ = self.start();
        }
    }

    // ── Engine events ──────────────────────────────────────────────

    /// Apply one engine notification.
    pub fn handle_event(&mut self, event: &SpeechEvent) {
        if !self.state.is_current(event) {
            tracing::debug!(
                request = %event.request,
                kind = ?event.kind,
                state = self.state.label(),
                "Ignoring stale speech event"
            );
            return;
        }

        match &event.kind {
            SpeechEventKind::Started => {
                tracing::debug!(request = %event.request, "Playback started");
            }
            SpeechEventKind::Ended => {
                tracing::debug!(request = %event.request, "Playback finished");
            }
            SpeechEventKind::Errored(SpeechFailure::Interrupted) => {
                tracing::debug!(request = %event.request, "Playback interrupted");
            }
            SpeechEventKind::Errored(failure) => {
                tracing::error!(
                    request = %event.request,
                    error = %failure,
                    "Speech synthesis error"
                );
            }
        }

        self.set_state(self.state.on_event(event));
    }

    /// Apply every queued notification without waiting. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(&event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next engine notification, apply it, and return the new state.
    ///
    /// The controller keeps its own sender alive, so this only returns once
    /// an event arrives; race it against user input in the host loop.
    pub async fn next_event(&mut self) -> PlaybackState {
        if let Some(event) = self.event_rx.recv().await {
            self.handle_event(&event);
        }
        self.state
    }

    /// Unmount the control, cancelling any playback.
    pub fn unmount(self) {
        drop(self);
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            tracing::debug!(
                old = self.state.label(),
                new = new_state.label(),
                "Read-aloud state transition"
            );
            self.state = new_state;
        }
    }
}

impl Drop for ReadAloudController {
    fn drop(&mut self) {
        if self.state.is_supported() {
            self.engine.cancel();
            tracing::debug!(was = self.state.label(), "Read-aloud control unmounted");
        }
    }
}
