//! Process-level tests for `CommandSpeechEngine`.
//!
//! Real speech programs are not assumed to be installed. Instead the engine
//! is pointed at coreutils binaries posing as `say` (which receives
//! `-- <text>`): `true` finishes at once, `false` fails, and `sleep` keeps
//! running until cancelled.

#![cfg(unix)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use readaloud_core::{
    PlaybackState, ReadAloudProps, RequestId, SpeechEvent, SpeechEventKind, SpeechFailure,
    SpeechSynthesisPort, UtteranceRequest,
};
use readaloud_speech::{CommandSpeechEngine, EngineError, ReadAloudController, SpeechProgram};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

fn coreutil(name: &str) -> PathBuf {
    which::which(name).unwrap_or_else(|_| panic!("{name} not found on PATH"))
}

fn engine_for(binary: &str) -> CommandSpeechEngine {
    CommandSpeechEngine::new(SpeechProgram::Say, coreutil(binary)).unwrap()
}

async fn recv(rx: &mut mpsc::UnboundedReceiver<SpeechEvent>) -> SpeechEvent {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for speech event")
        .expect("event channel closed")
}

#[test]
fn engine_requires_a_runtime() {
    let result = CommandSpeechEngine::new(SpeechProgram::Say, coreutil("true"));
    assert!(matches!(result, Err(EngineError::NoRuntime)));
}

#[tokio::test]
async fn successful_exit_reports_started_then_ended() {
    let engine = engine_for("true");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let request = UtteranceRequest::new(RequestId::FIRST, "Hello", "en-US");

    engine.speak(&request, tx).unwrap();

    assert_eq!(recv(&mut rx).await, SpeechEvent::started(RequestId::FIRST));
    assert_eq!(recv(&mut rx).await, SpeechEvent::ended(RequestId::FIRST));
    assert_eq!(engine.active_request(), None);
}

#[tokio::test]
async fn failing_exit_reports_synthesis_error() {
    let engine = engine_for("false");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let request = UtteranceRequest::new(RequestId::FIRST, "Hello", "en-US");

    engine.speak(&request, tx).unwrap();

    assert_eq!(recv(&mut rx).await, SpeechEvent::started(RequestId::FIRST));
    let event = recv(&mut rx).await;
    let SpeechEventKind::Errored(SpeechFailure::Synthesis(_)) = event.kind else {
        panic!("unexpected event: {event:?}");
    };
}

#[tokio::test]
async fn cancel_interrupts_running_process() {
    let engine = engine_for("sleep");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let request = UtteranceRequest::new(RequestId::FIRST, "30", "en-US");

    engine.speak(&request, tx).unwrap();
    assert_eq!(recv(&mut rx).await, SpeechEvent::started(RequestId::FIRST));
    assert_eq!(engine.active_request(), Some(RequestId::FIRST));

    engine.cancel();

    assert_eq!(
        recv(&mut rx).await,
        SpeechEvent::interrupted(RequestId::FIRST)
    );
    assert_eq!(engine.active_request(), None);
}

#[tokio::test]
async fn new_request_interrupts_previous_one() {
    let engine = engine_for("sleep");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let first = UtteranceRequest::new(RequestId::new(1), "30", "en-US");
    let second = UtteranceRequest::new(RequestId::new(2), "30", "en-US");

    engine.speak(&first, tx.clone()).unwrap();
    engine.speak(&second, tx).unwrap();

    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(recv(&mut rx).await);
    }
    assert!(seen.contains(&SpeechEvent::started(RequestId::new(1))));
    assert!(seen.contains(&SpeechEvent::started(RequestId::new(2))));
    assert!(seen.contains(&SpeechEvent::interrupted(RequestId::new(1))));
    assert_eq!(engine.active_request(), Some(RequestId::new(2)));

    engine.cancel();
    assert_eq!(
        recv(&mut rx).await,
        SpeechEvent::interrupted(RequestId::new(2))
    );
}

#[tokio::test]
async fn missing_binary_is_a_spawn_error() {
    let engine = CommandSpeechEngine::new(
        SpeechProgram::Say,
        PathBuf::from("/nonexistent/readaloud-say"),
    )
    .unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    let request = UtteranceRequest::new(RequestId::FIRST, "Hello", "en-US");

    let err = engine.speak(&request, tx).unwrap_err();
    assert!(err.to_string().starts_with("Failed to start speech engine: say"));
}

#[tokio::test]
async fn controller_reaches_idle_after_process_finishes() {
    let engine: Arc<dyn SpeechSynthesisPort> = Arc::new(engine_for("true"));
    let mut controller = ReadAloudController::new(engine, ReadAloudProps::new("**Done**"));

    let id = controller.start().unwrap();
    assert_eq!(controller.state(), PlaybackState::Speaking { request: id });

    let state = timeout(WAIT, async {
        loop {
            let state = controller.next_event().await;
            if !state.is_speaking() {
                break state;
            }
        }
    })
    .await
    .expect("controller never returned to idle");

    assert_eq!(state, PlaybackState::Idle);
}

#[tokio::test]
async fn controller_stop_kills_process() {
    let engine = Arc::new(engine_for("sleep"));
    let mut controller = ReadAloudController::new(engine.clone(), ReadAloudProps::new("30"));

    let id = controller.start().unwrap();
    assert_eq!(engine.active_request(), Some(id));

    controller.stop();
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(engine.active_request(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_command_runs_on_multi_thread_runtime() {
    // `true --cancel` stands in for `spd-say --cancel`.
    let engine = CommandSpeechEngine::new(SpeechProgram::SpdSay, coreutil("true")).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let request = UtteranceRequest::new(RequestId::FIRST, "Hello", "en-US");

    engine.speak(&request, tx).unwrap();
    assert_eq!(recv(&mut rx).await, SpeechEvent::started(RequestId::FIRST));

    engine.cancel();
    assert_eq!(engine.active_request(), None);
}

#[tokio::test]
async fn cancel_command_runs_on_current_thread_runtime() {
    let engine = CommandSpeechEngine::new(SpeechProgram::SpdSay, coreutil("true")).unwrap();
    engine.cancel();
    assert_eq!(engine.active_request(), None);
}
