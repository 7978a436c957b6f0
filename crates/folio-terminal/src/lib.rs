//! Terminal command interpreter and session state machine.
//!
//! Input flows one way: the [`InputController`] accumulates key events and
//! submits complete lines to a [`TerminalHandle`], whose worker task owns
//! the [`Interpreter`] and runs one command at a time in arrival order.
//! Commands are registry-based: each implements [`Command`] and returns a
//! [`CommandOutput`] script of effects (lines, pauses, privilege changes)
//! that the interpreter plays back through the [`LineRenderer`].

mod commands;
mod handle;
mod input;
mod interpreter;
pub mod locale;
mod render;
mod session;

/// Register the portfolio commands (about, contact, admin, view, ...).
pub use commands::register_builtins;
/// Single-consumer command queue and its worker task.
pub use handle::TerminalHandle;
/// Key-event accumulator and its boot gate.
pub use input::{BootGate, InputAction, InputController};
/// Command trait, registry, output effects and the interpreter itself.
pub use interpreter::{
    Command, CommandOutput, CommandRegistry, ContentSource, Effect, Environment, Interpreter,
    ParsedCommand, split_chain,
};
/// Output sinks and the (optionally animated) line renderer.
pub use render::{BufferSink, LineRenderer, OutputSink, SharedSink};
/// Per-terminal session state.
pub use session::Session;
