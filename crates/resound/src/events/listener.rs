//! `Listener`, a named callback binding with a one-shot flag.
//!
//! Callbacks are stored as `Rc<dyn Fn(&[Value])>` so cloning a listener is
//! cheap and the emitter can invoke a working copy without holding any
//! borrow of the registry. A one-shot listener clears its own name and
//! callback after firing and never fires again.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use serde_json::Value;

/// Closure type for event callbacks.
///
/// Callbacks receive the emission's arguments as a borrowed slice; an
/// argument-free emission delivers an empty slice.
pub type EventCallback = dyn Fn(&[Value]);

/// Owned argument payload of a single emission.
pub type EventArgs = Vec<Value>;

/// A named callback binding held by the event registry.
///
/// While live, `name` identifies the channel the listener is bound to.
/// After a one-shot listener fires, both `name` and `callback` are cleared
/// and the listener is inert: it matches no channel and invoking it only
/// logs a diagnostic.
#[derive(Clone)]
pub struct Listener {
    name: Option<String>,
    callback: Option<Rc<EventCallback>>,
    once: bool,
}

impl Listener {
    /// Create a listener bound to `name`.
    ///
    /// `once` marks the listener one-shot: it self-invalidates after its
    /// first invocation.
    pub fn new(name: impl Into<String>, callback: impl Fn(&[Value]) + 'static, once: bool) -> Self {
        Self {
            name: Some(name.into()),
            callback: Some(Rc::new(callback)),
            once,
        }
    }

    /// Create a listener whose callback has not been supplied yet.
    ///
    /// Invoking it logs "callback is not registered yet" instead of
    /// failing; registration itself never fails for callback reasons.
    pub fn unregistered(name: impl Into<String>, once: bool) -> Self {
        Self {
            name: Some(name.into()),
            callback: Some(Rc::new(|_args: &[Value]| {
                tracing::warn!("callback is not registered yet");
            })),
            once,
        }
    }

    /// The channel name this listener is bound to, or `None` once inert.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this listener self-invalidates after firing.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Whether this listener has already fired as a one-shot.
    pub fn is_inert(&self) -> bool {
        self.name.is_none() && self.callback.is_none()
    }

    /// Whether this listener is bound to `name`. Inert listeners match
    /// nothing.
    pub fn matches(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Invoke the callback with `args`.
    ///
    /// A panicking callback is fatal: the panic is caught, reported, and
    /// the process exits with code 1. Invoking an inert listener logs a
    /// diagnostic and does nothing else.
    pub fn invoke(&mut self, args: &[Value]) {
        let callback = self.callback.clone();

        let outcome = match callback {
            Some(cb) => catch_unwind(AssertUnwindSafe(|| cb(args))),
            None => {
                tracing::warn!("callback is not registered yet");
                Ok(())
            }
        };

        // Cleanup runs before the fatal report: a fired one-shot goes
        // inert no matter how its callback ended.
        if self.once {
            self.name = None;
            self.callback = None;
        }

        if let Err(payload) = outcome {
            tracing::error!(
                error = %panic_message(payload.as_ref()),
                "listener callback panicked during invoke; terminating"
            );
            std::process::exit(1);
        }
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "opaque panic payload"
    }
}
