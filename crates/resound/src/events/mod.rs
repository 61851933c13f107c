//! Event layer: named channels, listeners, and the emitter.
//!
//! # Overview
//!
//! [`EventEmitter`] binds channel names to [`Listener`]s and delivers
//! emissions synchronously. An emission that finds no listener is buffered
//! and replayed on the next matching registration.
//!
//! # Modules
//!
//! - [`listener`]: [`Listener`] and the callback type aliases.
//! - [`emitter`]: [`EventEmitter`] and [`EmitOutcome`].

pub mod emitter;
pub mod listener;

pub use emitter::{EmitOutcome, EventEmitter};
pub use listener::{EventArgs, EventCallback, Listener};
