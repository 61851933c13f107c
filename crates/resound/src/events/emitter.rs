//! `EventEmitter`, named channels with one-shot listeners and buffered replay.
//!
//! Each channel holds at most one live listener: `on` and `once` register
//! only when the name is vacant. Emitting a name nobody listens to buffers
//! the emission (when caching is enabled), and the next matching
//! registration replays it.
//!
//! All methods take `&self` (interior mutability via `RefCell`); borrows are
//! released before any callback runs, so callbacks may re-enter the emitter
//! through an `Rc` handle to register, remove, or emit mid-emission. The
//! emitter is single-threaded by construction: callbacks are `Rc`, so the
//! type is neither `Send` nor `Sync`.
//!
//! Failures crossing a public method are tagged with that method's name;
//! see [`EmitterError`].

use std::cell::RefCell;

use serde_json::Value;

use crate::collection::Collection;
use crate::error::{EmitterError, Result};

use super::listener::{EventArgs, Listener};

// ============================================================================
// EmitOutcome
// ============================================================================

/// What `emit` did with an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    /// A registered listener was invoked.
    Delivered,
    /// No listener was registered; the emission was buffered for replay.
    Cached,
    /// No listener was registered and caching is disabled; the emission
    /// was dropped.
    NoListener,
}

impl EmitOutcome {
    /// Whether a listener actually received the emission.
    pub fn is_delivered(&self) -> bool {
        matches!(self, EmitOutcome::Delivered)
    }
}

// ============================================================================
// PendingEmission
// ============================================================================

/// A buffered emission awaiting a matching registration.
#[derive(Clone)]
struct PendingEmission {
    name: String,
    args: EventArgs,
}

// ============================================================================
// EventEmitter
// ============================================================================

/// Synchronous named-event emitter.
///
/// Owns the listener registry and the pending-emission cache. Uniqueness of
/// listener names is enforced here as policy, not by the underlying
/// [`Collection`].
pub struct EventEmitter {
    listening: RefCell<Collection<Listener>>,
    cache: RefCell<Collection<PendingEmission>>,
    do_cache: bool,
}

impl EventEmitter {
    /// Create an emitter with emission caching enabled.
    pub fn new() -> Self {
        Self::with_cache(true)
    }

    /// Create an emitter with emission caching explicitly enabled or
    /// disabled.
    ///
    /// With caching disabled, emissions that find no listener are dropped
    /// and `on`/`once` never replay anything.
    pub fn with_cache(cache: bool) -> Self {
        Self {
            listening: RefCell::new(Collection::new()),
            cache: RefCell::new(Collection::new()),
            do_cache: cache,
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a persistent listener for `name`.
    ///
    /// If a listener for `name` already exists the registration is a silent
    /// no-op; duplicate names never coexist. Either way, when caching is
    /// enabled the first cached emission matching `name` is replayed and the
    /// whole cache is then cleared; `Ok(true)` reports that a replay
    /// happened. With caching disabled this always returns `Ok(true)`.
    pub fn on(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&[Value]) + 'static,
    ) -> Result<bool> {
        let name = name.into();
        let listener = Listener::new(name.clone(), callback, false);
        self.attach(name, listener)
            .map_err(|source| EmitterError::in_operation("on", source))
    }

    /// Register a one-shot listener for `name`.
    ///
    /// The listener self-invalidates after its first invocation and is
    /// removed from the registry immediately after firing. Vacancy check
    /// and cache replay behave exactly like [`on`](EventEmitter::on).
    pub fn once(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&[Value]) + 'static,
    ) -> Result<bool> {
        let name = name.into();
        let listener = Listener::new(name.clone(), callback, true);
        self.attach(name, listener)
            .map_err(|source| EmitterError::in_operation("once", source))
    }

    fn attach(&self, name: String, listener: Listener) -> Result<bool> {
        {
            let mut listening = self.listening.borrow_mut();
            if !listening.contains(|l| l.matches(&name)) {
                listening.append(listener);
            }
        }

        if !self.do_cache {
            return Ok(true);
        }

        // Replay runs even when registration was a no-op: a cached emission
        // is delivered to whichever listener currently holds the name.
        if self.check_cache(&name)? {
            let dropped = {
                let mut cache = self.cache.borrow_mut();
                let dropped = cache.count();
                cache.clear();
                dropped
            };
            tracing::debug!(event = %name, dropped, "cleared emission cache after replay");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // -----------------------------------------------------------------------
    // Emission
    // -----------------------------------------------------------------------

    /// Emit `name` with `args` to its registered listener.
    ///
    /// The first listener whose name matches is invoked. A fired one-shot
    /// listener is removed, along with any same-named entries, immediately
    /// afterwards. When no listener matches, the emission is either
    /// buffered ([`EmitOutcome::Cached`]) or dropped with a warning
    /// ([`EmitOutcome::NoListener`]) depending on the caching flag.
    pub fn emit(&self, name: &str, args: &[Value]) -> Result<EmitOutcome> {
        self.deliver(name, args)
            .map_err(|source| EmitterError::in_operation("emit", source))
    }

    fn deliver(&self, name: &str, args: &[Value]) -> Result<EmitOutcome> {
        // Clone the matched listener out so no registry borrow is held
        // while the callback runs; callbacks may re-enter the emitter.
        let matched = {
            let listening = self.listening.borrow();
            listening.first_or_none(|l| l.matches(name)).cloned()
        };

        if let Some(mut listener) = matched {
            listener.invoke(args);
            if listener.is_once() {
                // The registry's copy kept its name (only the invoked clone
                // went inert), so the sweep removes the fired entry too.
                self.remove_listener(name)?;
            }
            return Ok(EmitOutcome::Delivered);
        }

        if self.do_cache {
            tracing::debug!(
                event = %name,
                args = args.len(),
                "no listener registered; caching emission"
            );
            self.cache.borrow_mut().append(PendingEmission {
                name: name.to_string(),
                args: args.to_vec(),
            });
            Ok(EmitOutcome::Cached)
        } else {
            tracing::warn!(event = %name, "no listener registered for event");
            Ok(EmitOutcome::NoListener)
        }
    }

    // -----------------------------------------------------------------------
    // Cache replay
    // -----------------------------------------------------------------------

    /// Replay the first cached emission whose name matches.
    ///
    /// Reports whether a replay happened. Clearing the cache afterwards is
    /// the caller's step, so detection stays separate from the wholesale
    /// clear.
    fn check_cache(&self, name: &str) -> Result<bool> {
        self.replay_pending(name)
            .map_err(|source| EmitterError::in_operation("check_cache", source))
    }

    fn replay_pending(&self, name: &str) -> Result<bool> {
        // Clone the pending emission out before re-emitting; emit may
        // append to the cache re-entrantly.
        let pending = {
            let cache = self.cache.borrow();
            cache.first_or_none(|p| p.name == name).cloned()
        };

        match pending {
            Some(PendingEmission { name, args }) => {
                tracing::debug!(event = %name, args = args.len(), "replaying cached emission");
                self.emit(&name, &args)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove every listener bound to `name`, not just the first.
    pub fn remove_listener(&self, name: &str) -> Result<()> {
        self.detach(name)
            .map_err(|source| EmitterError::in_operation("remove_listener", source))
    }

    fn detach(&self, name: &str) -> Result<()> {
        let mut listening = self.listening.borrow_mut();
        while let Some(index) = listening.position_of(|l| l.matches(name)) {
            listening.remove_at(index)?;
        }
        Ok(())
    }

    /// Clear the registry entirely. The pending cache is left intact.
    pub fn remove_all_listeners(&self) {
        self.listening.borrow_mut().clear();
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listening.borrow().count()
    }

    /// Number of buffered emissions awaiting replay.
    pub fn pending_count(&self) -> usize {
        self.cache.borrow().count()
    }

    /// Whether emission caching is enabled.
    pub fn cache_enabled(&self) -> bool {
        self.do_cache
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}
