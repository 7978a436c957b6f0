//! Single-consumer command queue.
//!
//! The worker task owns the [`Interpreter`] and pulls submitted lines off
//! an unbounded FIFO, so at most one command body is in flight and later
//! submissions wait their turn in arrival order.

use std::time::Duration;

use folio_types::error::{FolioError, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::input::{BootGate, InputController};
use crate::interpreter::Interpreter;
use crate::render::OutputSink;
use crate::session::Session;

/// Front-end side of a running terminal.
pub struct TerminalHandle<S> {
    tx: mpsc::UnboundedSender<String>,
    gate: BootGate,
    session: watch::Receiver<Session>,
    link_delay: Duration,
    worker: JoinHandle<Interpreter<S>>,
}

impl<S: OutputSink + Send + 'static> TerminalHandle<S> {
    /// Start the worker: boot sequence first, then queued commands.
    pub fn spawn(mut interpreter: Interpreter<S>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let gate = BootGate::new(interpreter.config().boot_sequence);
        let session = interpreter.subscribe();
        let link_delay = interpreter.config().link_delay();

        let worker_gate = gate.clone();
        let worker = tokio::spawn(async move {
            interpreter.boot().await;
            worker_gate.finish();
            log::debug!("Boot sequence finished");
            while let Some(line) = rx.recv().await {
                interpreter.execute_line(&line).await;
            }
            log::debug!("Command queue closed");
            interpreter
        });

        Self {
            tx,
            gate,
            session,
            link_delay,
            worker,
        }
    }

    /// Queue a line as if it had been typed and submitted.
    pub fn submit(&self, line: impl Into<String>) -> Result<()> {
        self.tx
            .send(line.into())
            .map_err(|_| FolioError::Command("terminal worker stopped".to_string()))
    }

    /// A command link was clicked: wait the link delay, then submit it.
    pub async fn click(&self, command: &str) -> Result<()> {
        tokio::time::sleep(self.link_delay).await;
        self.submit(command)
    }

    /// An input controller feeding this terminal's queue.
    pub fn input_controller(&self) -> InputController {
        InputController::new(self.tx.clone(), self.gate.clone())
    }

    pub fn is_booting(&self) -> bool {
        self.gate.is_booting()
    }

    /// Latest published session state.
    pub fn session(&self) -> Session {
        *self.session.borrow()
    }

    /// Stop accepting commands, drain the queue and hand the interpreter
    /// back. Input controllers hold their own senders and must be dropped
    /// first.
    pub async fn shutdown(self) -> Result<Interpreter<S>> {
        drop(self.tx);
        self.worker
            .await
            .map_err(|e| FolioError::Command(format!("terminal worker failed: {e}")))
    }
}
