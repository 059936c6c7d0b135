//! Speak command handler.
//!
//! Mounts one read-aloud control in the terminal, starts it, and keeps it
//! alive until playback ends. Enter stops playback; Ctrl-C unmounts the
//! control, which cancels the engine on the way out.

use std::future::Future;
use std::io::{self, IsTerminal};

use readaloud_core::{ReadAloudProps, ReadAloudSettings};
use readaloud_speech::{ReadAloudController, detect_engine};
use tokio::sync::mpsc;

use crate::commands::TextInput;
use crate::error::CliError;
use crate::utils::input::{TextSource, read_text, spawn_enter_listener};

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The engine finished (or failed) on its own.
    Finished,
    /// The user pressed Enter.
    Stopped,
    /// The shutdown signal fired and the control was unmounted.
    Interrupted,
    /// No speech capability; nothing was rendered.
    NotSupported,
    /// The start control was disabled because there is no text.
    NothingToRead,
    /// The engine refused the utterance.
    FailedToStart,
}

/// Execute the speak command.
pub async fn execute(settings: &ReadAloudSettings, input: &TextInput) -> Result<(), CliError> {
    let (text, source) = read_text(input, io::stdin())?;
    let engine = detect_engine(settings)?;
    let props = ReadAloudProps::new(text).with_language(settings.effective_language());
    let controller = ReadAloudController::new(engine, props);

    // Piped text leaves nothing on stdin to listen to.
    let stop_requests =
        (source != TextSource::Stdin && io::stdin().is_terminal()).then(spawn_enter_listener);

    match play(controller, stop_requests, tokio::signal::ctrl_c()).await {
        PlaybackOutcome::NotSupported => Err(CliError::Unavailable(
            "no speech program found on PATH".to_string(),
        )),
        PlaybackOutcome::FailedToStart => Err(CliError::Engine(
            "the speech engine did not accept the text".to_string(),
        )),
        PlaybackOutcome::NothingToRead => {
            eprintln!("Nothing to read.");
            Ok(())
        }
        outcome => {
            tracing::debug!(?outcome, "Playback session ended");
            Ok(())
        }
    }
}

/// Drive one playback session to completion.
///
/// Each message on `stop_requests` stops playback; the channel closing just
/// stops listening. `shutdown` resolving unmounts the control.
pub async fn play<F>(
    mut controller: ReadAloudController,
    mut stop_requests: Option<mpsc::UnboundedReceiver<()>>,
    shutdown: F,
) -> PlaybackOutcome
where
    F: Future,
{
    let view = controller.view();
    if !view.is_visible() {
        return PlaybackOutcome::NotSupported;
    }
    println!("{view}");
    if !view.is_enabled() {
        return PlaybackOutcome::NothingToRead;
    }

    let Some(request) = controller.start() else {
        return PlaybackOutcome::FailedToStart;
    };
    tracing::debug!(%request, "Playback started");
    println!("{}", controller.view());

    tokio::pin!(shutdown);
    let mut stopped = false;

    while controller.is_speaking() {
        tokio::select! {
            state = controller.next_event() => {
                tracing::debug!(state = state.label(), "Playback state changed");
            }
            request = next_stop_request(&mut stop_requests) => match request {
                Some(()) => {
                    controller.stop();
                    stopped = true;
                }
                None => stop_requests = None,
            },
            _ = &mut shutdown => {
                tracing::debug!("Shutdown requested, unmounting control");
                controller.unmount();
                return PlaybackOutcome::Interrupted;
            }
        }
    }

    println!("{}", controller.view());
    if stopped {
        PlaybackOutcome::Stopped
    } else {
        PlaybackOutcome::Finished
    }
}

async fn next_stop_request(requests: &mut Option<mpsc::UnboundedReceiver<()>>) -> Option<()> {
    match requests {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
