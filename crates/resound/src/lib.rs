//! Synchronous named-event emitter with buffered replay.
//!
//! # Overview
//!
//! Callers attach callbacks to named channels, persistently via
//! [`EventEmitter::on`] or one-shot via [`EventEmitter::once`], and deliver
//! events with [`EventEmitter::emit`]. An emission that finds no listener
//! is buffered (unless caching is disabled) and replayed automatically when
//! a matching listener registers. Arguments travel as `serde_json::Value`
//! slices, so channels carry arbitrary dynamic payloads.
//!
//! Everything is synchronous and single-threaded: `emit` completes the
//! callback, including any cascading replay, before returning. Callbacks
//! may re-enter the emitter through an `Rc` handle.
//!
//! The listener registry and the emission cache are both built on
//! [`Collection`], an ordered container with predicate-based queries.

pub mod collection;
pub mod error;
pub mod events;

pub use collection::Collection;
pub use error::{CollectionError, EmitterError, Result};
pub use events::{EmitOutcome, EventArgs, EventCallback, EventEmitter, Listener};
