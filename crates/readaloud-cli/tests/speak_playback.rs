//! Tests for the terminal playback loop behind `readaloud speak`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use readaloud_cli::handlers::speak::{PlaybackOutcome, play};
use readaloud_core::{
    ReadAloudProps, SpeechEvent, SpeechEventSender, SpeechPortError, SpeechSynthesisPort,
    UtteranceRequest,
};
use readaloud_speech::{ReadAloudController, UnsupportedEngine};
use tokio::sync::mpsc;

/// What the scripted engine does when asked to speak.
#[derive(Clone, Copy)]
enum Script {
    /// Report started and ended straight away.
    FinishImmediately,
    /// Report started, then never finish.
    Hang,
    /// Refuse the request.
    Refuse,
}

struct ScriptedEngine {
    script: Script,
    cancels: AtomicUsize,
    // Held so a hanging utterance keeps its channel open.
    held: std::sync::Mutex<Vec<SpeechEventSender>>,
}

impl ScriptedEngine {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            cancels: AtomicUsize::new(0),
            held: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesisPort for ScriptedEngine {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(
        &self,
        request: &UtteranceRequest,
        events: SpeechEventSender,
    ) -> Result<(), SpeechPortError> {
        match self.script {
            Script::FinishImmediately => {
                events.send(SpeechEvent::started(request.id())).unwrap();
                events.send(SpeechEvent::ended(request.id())).unwrap();
            }
            Script::Hang => {
                events.send(SpeechEvent::started(request.id())).unwrap();
                self.held.lock().unwrap().push(events);
            }
            Script::Refuse => return Err(SpeechPortError::Rejected("no voice".into())),
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn controller(engine: Arc<dyn SpeechSynthesisPort>, text: &str) -> ReadAloudController {
    ReadAloudController::new(engine, ReadAloudProps::new(text))
}

#[tokio::test]
async fn finishes_when_engine_ends() {
    let engine = ScriptedEngine::new(Script::FinishImmediately);
    let outcome = play(
        controller(engine.clone(), "# Report"),
        None,
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::Finished);
}

#[tokio::test]
async fn enter_stops_playback() {
    let engine = ScriptedEngine::new(Script::Hang);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(()).unwrap();

    let outcome = play(
        controller(engine.clone(), "Hello"),
        Some(rx),
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::Stopped);
    // Before submit, on stop, and on drop.
    assert_eq!(engine.cancels(), 3);
}

#[tokio::test]
async fn closed_stop_channel_keeps_playing_until_shutdown() {
    let engine = ScriptedEngine::new(Script::Hang);
    let (tx, rx) = mpsc::unbounded_channel::<()>();
    drop(tx);

    let outcome = play(
        controller(engine.clone(), "Hello"),
        Some(rx),
        tokio::time::sleep(std::time::Duration::from_millis(20)),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::Interrupted);
    assert_eq!(engine.cancels(), 2);
}

#[tokio::test]
async fn shutdown_unmounts_and_cancels() {
    let engine = ScriptedEngine::new(Script::Hang);
    let outcome = play(
        controller(engine.clone(), "Hello"),
        None,
        std::future::ready(()),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::Interrupted);
    assert_eq!(engine.cancels(), 2);
}

#[tokio::test]
async fn unsupported_host_renders_nothing() {
    let outcome = play(
        controller(Arc::new(UnsupportedEngine), "Hello"),
        None,
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::NotSupported);
}

#[tokio::test]
async fn empty_text_has_nothing_to_read() {
    let engine = ScriptedEngine::new(Script::FinishImmediately);
    let outcome = play(
        controller(engine.clone(), ""),
        None,
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::NothingToRead);
    // Only the teardown cancel.
    assert_eq!(engine.cancels(), 1);
}

#[tokio::test]
async fn refused_request_fails_to_start() {
    let engine = ScriptedEngine::new(Script::Refuse);
    let outcome = play(
        controller(engine.clone(), "Hello"),
        None,
        std::future::pending::<()>(),
    )
    .await;

    assert_eq!(outcome, PlaybackOutcome::FailedToStart);
}
