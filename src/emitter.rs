use std::fmt;
use std::rc::Rc;

use crate::{
    EmitterBuilder, EventKey, Handler, Keys, Registry, SharedRegistry, Unsubscribe,
    WildcardHandler,
};

#[cfg(feature = "monitoring")]
use crate::monitoring::{MonitorSet, Phase};

/// A synchronous publish/subscribe event emitter.
///
/// Handlers register under event-type keys with [`on`](Emitter::on); an
/// [`emit`](Emitter::emit) call dispatches the payload to every handler
/// registered under the emitted key, in registration order, then to every
/// wildcard handler registered with [`on_any`](Emitter::on_any). Everything
/// runs synchronously on the caller's stack — no queuing, no scheduling, no
/// threads.
///
/// # Example
///
/// ```rust
/// use crier::{Emitter, Handler, WildcardHandler};
///
/// let emitter: Emitter<String, String> = Emitter::new();
///
/// let greet = Handler::new(|user: &String| println!("welcome, {user}"));
/// let audit = WildcardHandler::new(|key: &String, _: &String| println!("[audit] {key}"));
///
/// let guard = emitter.on("login", &greet);
/// let _wildcard = emitter.on_any(&audit);
///
/// emitter.emit("login", &"ada".to_owned());
///
/// guard.unsubscribe();
/// assert_eq!(emitter.handler_count(&"login".to_owned()), 0);
/// ```
///
/// # The registry is shared and exposed
///
/// The handler registry lives behind `Rc<RefCell<_>>` and is public as
/// [`all`](Emitter::all). This is a deliberate escape hatch: callers may
/// pre-seed it, inspect it, or mutate it directly at any time, and every
/// operation tolerates whatever state that leaves behind. An emitter built
/// with [`with_registry`](Emitter::with_registry) adopts the given registry
/// by reference — mutation through any other clone of the `Rc` is visible to
/// the emitter, and cloning the emitter itself yields a second handle onto
/// the same registry.
///
/// # Re-entrancy
///
/// Each dispatch pass of `emit` operates on a snapshot of the relevant
/// handler sequence, taken before any handler runs. Handlers may therefore
/// call `on`, `off`, and `emit` freely — including recursively on the same
/// key — without corrupting the in-flight pass. A handler added during a
/// pass fires from the next `emit` onward; a handler removed during a pass
/// still fires in the current one.
///
/// # Panics
///
/// The emitter never catches handler panics. A panicking handler unwinds
/// through `emit` to the caller, skipping the rest of the dispatch.
pub struct Emitter<K: EventKey, E> {
    /// The live handler registry. Read or mutate it at will.
    pub all: SharedRegistry<K, E>,
    #[cfg(feature = "monitoring")]
    monitors: MonitorSet<K, E>,
}

impl<K: EventKey, E> Emitter<K, E> {
    /// An emitter with a fresh, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::new().into_shared())
    }

    /// An emitter that adopts an existing registry.
    ///
    /// The registry is used directly, not copied: the caller and the emitter
    /// alias the same storage. Useful for pre-seeded registries and for
    /// sharing one registry between several emitter handles.
    #[must_use]
    pub fn with_registry(all: SharedRegistry<K, E>) -> Self {
        Self {
            all,
            #[cfg(feature = "monitoring")]
            monitors: MonitorSet::new(),
        }
    }

    /// Start building an emitter with a seeded registry and/or monitors.
    #[must_use]
    pub fn builder() -> EmitterBuilder<K, E> {
        EmitterBuilder::new()
    }

    /// Register a typed handler under one or more keys.
    ///
    /// `keys` accepts a single key, an array, a slice, or a `Vec` (see
    /// [`Keys`]). The handler is appended to each key's sequence in the
    /// order the keys were given, creating sequences that don't exist yet.
    ///
    /// Returns an [`Unsubscribe`] guard that removes the handler from every
    /// key of this registration. Registering the same handler twice under
    /// one key is allowed; it will then fire twice per emission and each
    /// [`off`](Emitter::off) call removes one occurrence.
    pub fn on(&self, keys: impl Into<Keys<K>>, handler: &Handler<E>) -> Unsubscribe<K, E> {
        let keys = keys.into();
        {
            let mut all = self.all.borrow_mut();
            for key in keys.iter() {
                all.handlers
                    .entry(key.clone())
                    .or_default()
                    .push(handler.clone());
            }
        }
        for key in keys.iter() {
            tracing::trace!(key = ?key, "handler registered");
            #[cfg(feature = "monitoring")]
            self.monitors.notify(|m| m.on_handler_registered(key));
        }
        Unsubscribe::typed(
            Rc::downgrade(&self.all),
            keys.into_vec(),
            handler.clone(),
            #[cfg(feature = "monitoring")]
            self.monitors.clone(),
        )
    }

    /// Register a wildcard handler, invoked for every emission.
    ///
    /// Wildcard handlers receive the key that fired along with the payload,
    /// and always run after the emitted key's typed handlers.
    pub fn on_any(&self, handler: &WildcardHandler<K, E>) -> Unsubscribe<K, E> {
        self.all.borrow_mut().wildcard.push(handler.clone());
        tracing::trace!("wildcard handler registered");
        #[cfg(feature = "monitoring")]
        self.monitors.notify(|m| m.on_wildcard_registered());
        Unsubscribe::wildcard(
            Rc::downgrade(&self.all),
            handler.clone(),
            #[cfg(feature = "monitoring")]
            self.monitors.clone(),
        )
    }

    /// Remove the first occurrence of a typed handler under a key.
    ///
    /// At most one occurrence is removed per call; the sequence compacts
    /// immediately. Silently does nothing when the key has no sequence or
    /// the handler is not in it.
    pub fn off(&self, key: &K, handler: &Handler<E>) {
        let removed = {
            let mut all = self.all.borrow_mut();
            match all.handlers.get_mut(key) {
                Some(sequence) => match sequence.iter().position(|h| h == handler) {
                    Some(pos) => {
                        sequence.remove(pos);
                        true
                    }
                    None => false,
                },
                None => false,
            }
        };
        if removed {
            tracing::trace!(key = ?key, "handler removed");
            #[cfg(feature = "monitoring")]
            self.monitors.notify(|m| m.on_handler_removed(key));
        }
    }

    /// Remove the first occurrence of a wildcard handler.
    pub fn off_any(&self, handler: &WildcardHandler<K, E>) {
        let removed = {
            let mut all = self.all.borrow_mut();
            match all.wildcard.iter().position(|h| h == handler) {
                Some(pos) => {
                    all.wildcard.remove(pos);
                    true
                }
                None => false,
            }
        };
        if removed {
            tracing::trace!("wildcard handler removed");
            #[cfg(feature = "monitoring")]
            self.monitors.notify(|m| m.on_wildcard_removed());
        }
    }

    /// Remove every typed handler under a key.
    ///
    /// The key's sequence is emptied but the key itself stays in the
    /// registry. No-op when the key has no sequence — one is not created.
    /// Wildcard handlers are unaffected.
    pub fn clear(&self, key: &K) {
        let removed = {
            let mut all = self.all.borrow_mut();
            match all.handlers.get_mut(key) {
                Some(sequence) => {
                    let n = sequence.len();
                    sequence.clear();
                    n
                }
                None => 0,
            }
        };
        if removed > 0 {
            tracing::trace!(key = ?key, removed, "handlers cleared");
            #[cfg(feature = "monitoring")]
            for _ in 0..removed {
                self.monitors.notify(|m| m.on_handler_removed(key));
            }
        }
    }

    /// Remove every wildcard handler.
    pub fn clear_any(&self) {
        let removed = {
            let mut all = self.all.borrow_mut();
            let n = all.wildcard.len();
            all.wildcard.clear();
            n
        };
        if removed > 0 {
            tracing::trace!(removed, "wildcard handlers cleared");
            #[cfg(feature = "monitoring")]
            for _ in 0..removed {
                self.monitors.notify(|m| m.on_wildcard_removed());
            }
        }
    }

    /// Dispatch a payload to the key's handlers, then to wildcard handlers.
    ///
    /// Two passes, each over a snapshot of its sequence taken at the start
    /// of that pass:
    /// 1. every handler registered under `key`, in registration order,
    ///    invoked with the payload;
    /// 2. every wildcard handler, in registration order, invoked with
    ///    `(key, payload)`.
    ///
    /// Emitting a key with no handlers is a no-op for that pass; the
    /// wildcard pass still runs. A panicking handler unwinds to the caller
    /// and the rest of the dispatch is skipped.
    pub fn emit(&self, key: impl Into<K>, event: &E) {
        let key = key.into();

        #[cfg(feature = "monitoring")]
        self.monitors.notify(|m| m.on_emit(&key, event));

        // Snapshots are Vec<Rc> clones; the registry borrow is released
        // before any handler runs, so handlers may re-enter freely.
        let typed: Vec<Handler<E>> = self
            .all
            .borrow()
            .handlers
            .get(&key)
            .cloned()
            .unwrap_or_default();
        tracing::trace!(key = ?key, handlers = typed.len(), "emit");
        for handler in &typed {
            handler.call(event);
            #[cfg(feature = "monitoring")]
            self.monitors
                .notify(|m| m.on_delivery(&key, event, Phase::Typed));
        }

        let wildcard: Vec<WildcardHandler<K, E>> = self.all.borrow().wildcard.clone();
        for handler in &wildcard {
            handler.call(&key, event);
            #[cfg(feature = "monitoring")]
            self.monitors
                .notify(|m| m.on_delivery(&key, event, Phase::Wildcard));
        }
    }

    /// Number of typed handlers currently registered under a key.
    #[must_use]
    pub fn handler_count(&self, key: &K) -> usize {
        self.all.borrow().handler_count(key)
    }

    /// Number of wildcard handlers currently registered.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.all.borrow().wildcard_count()
    }

    /// The monitors attached to this emitter.
    #[cfg(feature = "monitoring")]
    #[cfg_attr(docsrs, doc(cfg(feature = "monitoring")))]
    pub fn monitors(&self) -> &MonitorSet<K, E> {
        &self.monitors
    }
}

impl<K: EventKey, E> Default for Emitter<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning yields a second handle onto the same registry (and monitors).
impl<K: EventKey, E> Clone for Emitter<K, E> {
    fn clone(&self) -> Self {
        Self {
            all: Rc::clone(&self.all),
            #[cfg(feature = "monitoring")]
            monitors: self.monitors.clone(),
        }
    }
}

impl<K: EventKey, E> fmt::Debug for Emitter<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Emitter");
        match self.all.try_borrow() {
            Ok(all) => s.field("registry", &*all),
            Err(_) => s.field("registry", &"<in use>"),
        };
        s.finish_non_exhaustive()
    }
}
