//! Speech through a system program run as a child process.
//!
//! One child per utterance. Submitting a new utterance or calling
//! [`cancel`](SpeechSynthesisPort::cancel) fires the cancellation token of the
//! current child; its watcher task kills the process and reports
//! `Errored(Interrupted)`.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use readaloud_core::{
    RequestId, SpeechEvent, SpeechEventSender, SpeechFailure, SpeechPortError, SpeechSynthesisPort,
    UtteranceRequest,
};
use tokio::process::{Child, Command};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio_util::sync::CancellationToken;

use super::SpeechProgram;
use crate::error::EngineError;

/// The child currently speaking.
struct ActiveUtterance {
    request: RequestId,
    cancel: CancellationToken,
}

/// Speech engine backed by `spd-say`, `espeak-ng`, `espeak` or `say`.
pub struct CommandSpeechEngine {
    program: SpeechProgram,
    path: PathBuf,
    runtime: Handle,
    active: Arc<Mutex<Option<ActiveUtterance>>>,
}

impl CommandSpeechEngine {
    /// Build an engine for `program` installed at `path`.
    ///
    /// Captures the current Tokio runtime; child processes are watched on it.
    pub fn new(program: SpeechProgram, path: PathBuf) -> Result<Self, EngineError> {
        let runtime = Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        Ok(Self {
            program,
            path,
            runtime,
            active: Arc::new(Mutex::new(None)),
        })
    }

    #[must_use]
    pub const fn program(&self) -> SpeechProgram {
        self.program
    }

    /// Request currently owned by a live child, if any.
    #[must_use]
    pub fn active_request(&self) -> Option<RequestId> {
        self.lock_active().as_ref().map(|a| a.request)
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveUtterance>> {
        lock_slot(&self.active)
    }

    /// Cancel the tracked child, if any.
    fn interrupt_active(&self) -> bool {
        self.lock_active().take().is_some_and(|active| {
            tracing::debug!(request = %active.request, "Cancelling active utterance");
            active.cancel.cancel();
            true
        })
    }

    /// Run the program's process-wide cancel command.
    ///
    /// Waits for it to exit: a cancel still in flight when the next
    /// utterance is submitted would silence the new one too. On a
    /// multi-thread runtime the wait is moved off the worker with
    /// `block_in_place`; a current-thread runtime has no other worker to
    /// hand tasks to, so the short wait happens inline.
    fn run_cancel_command(&self) {
        let Some(args) = self.program.cancel_args() else {
            return;
        };
        let run = || {
            std::process::Command::new(&self.path)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
        };
        let on_multi_thread_runtime = Handle::try_current()
            .is_ok_and(|handle| handle.runtime_flavor() == RuntimeFlavor::MultiThread);
        let status = if on_multi_thread_runtime {
            tokio::task::block_in_place(run)
        } else {
            run()
        };

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(engine = %self.program, %status, "Cancel command failed");
            }
            Err(e) => {
                tracing::warn!(engine = %self.program, error = %e, "Failed to run cancel command");
            }
        }
    }

    fn spawn_child(&self, request: &UtteranceRequest) -> Result<Child, SpeechPortError> {
        if !self.program.accepts_language() {
            tracing::debug!(
                engine = %self.program,
                language = request.language(),
                "Engine has no language option; using its default voice"
            );
        }

        let _guard = self.runtime.enter();
        Command::new(&self.path)
            .args(self.program.speak_args(request.cleaned_text(), request.language()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechPortError::Spawn(format!("{}: {e}", self.program)))
    }
}

impl SpeechSynthesisPort for CommandSpeechEngine {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(
        &self,
        request: &UtteranceRequest,
        events: SpeechEventSender,
    ) -> Result<(), SpeechPortError> {
        self.interrupt_active();

        let mut child = self.spawn_child(request)?;
        let id = request.id();
        let cancel = CancellationToken::new();

        *self.lock_active() = Some(ActiveUtterance {
            request: id,
            cancel: cancel.clone(),
        });

        tracing::debug!(
            request = %id,
            engine = %self.program,
            pid = ?child.id(),
            "Speech process started"
        );
        let _ = events.send(SpeechEvent::started(id));

        let active = Arc::clone(&self.active);
        self.runtime.spawn(async move {
            let exit = tokio::select! {
                status = child.wait() => Some(status),
                () = cancel.cancelled() => None,
            };

            let event = match exit {
                Some(Ok(status)) if status.success() => SpeechEvent::ended(id),
                Some(Ok(status)) => SpeechEvent::errored(
                    id,
                    SpeechFailure::Synthesis(format!("speech process exited with {status}")),
                ),
                Some(Err(e)) => SpeechEvent::errored(
                    id,
                    SpeechFailure::Synthesis(format!("failed to wait for speech process: {e}")),
                ),
                None => {
                    let _ = child.kill().await;
                    SpeechEvent::interrupted(id)
                }
            };

            // Release the slot unless a newer utterance already took it.
            {
                let mut slot = lock_slot(&active);
                if slot.as_ref().is_some_and(|a| a.request == id) {
                    *slot = None;
                }
            }

            if events.send(event).is_err() {
                tracing::debug!(request = %id, "Speech event receiver dropped");
            }
        });

        Ok(())
    }

    fn cancel(&self) {
        self.interrupt_active();
        self.run_cancel_command();
    }

    fn name(&self) -> &'static str {
        self.program.binary()
    }
}

fn lock_slot(slot: &Mutex<Option<ActiveUtterance>>) -> MutexGuard<'_, Option<ActiveUtterance>> {
    // A poisoned lock only means a panic elsewhere; the slot is still usable.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for CommandSpeechEngine {
    fn drop(&mut self) {
        self.interrupt_active();
    }
}
