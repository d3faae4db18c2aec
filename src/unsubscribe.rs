use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use crate::{EventKey, Handler, Registry, WildcardHandler};

#[cfg(feature = "monitoring")]
use crate::monitoring::MonitorSet;

enum Target<K: EventKey, E> {
    Typed { keys: Vec<K>, handler: Handler<E> },
    Wildcard(WildcardHandler<K, E>),
}

/// Undo token returned by [`Emitter::on`](crate::Emitter::on) and
/// [`Emitter::on_any`](crate::Emitter::on_any).
///
/// Calling [`unsubscribe`](Unsubscribe::unsubscribe) removes the handler
/// from every key it was registered under in that `on` call — equivalent to
/// calling [`Emitter::off`](crate::Emitter::off) once per key. Calling it
/// again is safe: each call removes at most one occurrence per key and
/// silently does nothing once the handler is gone.
///
/// The guard holds only a weak reference to the registry, so it does not
/// keep a discarded emitter alive; unsubscribing after the emitter (and all
/// registry clones) are dropped is a no-op. Dropping the guard without
/// calling it leaves the handler registered.
pub struct Unsubscribe<K: EventKey, E> {
    registry: Weak<RefCell<Registry<K, E>>>,
    target: Target<K, E>,
    #[cfg(feature = "monitoring")]
    monitors: MonitorSet<K, E>,
}

impl<K: EventKey, E> Unsubscribe<K, E> {
    pub(crate) fn typed(
        registry: Weak<RefCell<Registry<K, E>>>,
        keys: Vec<K>,
        handler: Handler<E>,
        #[cfg(feature = "monitoring")] monitors: MonitorSet<K, E>,
    ) -> Self {
        Self {
            registry,
            target: Target::Typed { keys, handler },
            #[cfg(feature = "monitoring")]
            monitors,
        }
    }

    pub(crate) fn wildcard(
        registry: Weak<RefCell<Registry<K, E>>>,
        handler: WildcardHandler<K, E>,
        #[cfg(feature = "monitoring")] monitors: MonitorSet<K, E>,
    ) -> Self {
        Self {
            registry,
            target: Target::Wildcard(handler),
            #[cfg(feature = "monitoring")]
            monitors,
        }
    }

    /// Remove the handler from every key this guard covers.
    ///
    /// Removes the first occurrence per key, in registration order. No-op
    /// for keys where the handler is no longer present, and a complete no-op
    /// once the registry itself has been dropped.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        match &self.target {
            Target::Typed { keys, handler } => {
                for key in keys {
                    let removed = {
                        let mut all = registry.borrow_mut();
                        remove_first(all.handlers.get_mut(key), handler)
                    };
                    if removed {
                        tracing::trace!(key = ?key, "handler unsubscribed");
                        #[cfg(feature = "monitoring")]
                        self.monitors.notify(|m| m.on_handler_removed(key));
                    }
                }
            }
            Target::Wildcard(handler) => {
                let removed = {
                    let mut all = registry.borrow_mut();
                    let pos = all.wildcard.iter().position(|h| h == handler);
                    if let Some(pos) = pos {
                        all.wildcard.remove(pos);
                    }
                    pos.is_some()
                };
                if removed {
                    tracing::trace!("wildcard handler unsubscribed");
                    #[cfg(feature = "monitoring")]
                    self.monitors.notify(|m| m.on_wildcard_removed());
                }
            }
        }
    }
}

fn remove_first<E>(sequence: Option<&mut Vec<Handler<E>>>, handler: &Handler<E>) -> bool {
    let Some(sequence) = sequence else {
        return false;
    };
    match sequence.iter().position(|h| h == handler) {
        Some(pos) => {
            sequence.remove(pos);
            true
        }
        None => false,
    }
}

impl<K: EventKey, E> fmt::Debug for Unsubscribe<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            Target::Typed { keys, .. } => format!("typed({} keys)", keys.len()),
            Target::Wildcard(_) => "wildcard".to_owned(),
        };
        f.debug_struct("Unsubscribe")
            .field("target", &target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::{Emitter, Handler, WildcardHandler};

    #[test]
    fn unsubscribe_removes_handler() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let calls = Rc::new(Cell::new(0));
        let calls_in = calls.clone();
        let handler = Handler::new(move |_: &u32| calls_in.set(calls_in.get() + 1));

        let guard = emitter.on("tick", &handler);
        emitter.emit("tick", &1);
        guard.unsubscribe();
        emitter.emit("tick", &2);

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn second_call_is_a_no_op() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let handler = Handler::new(|_: &u32| {});

        let guard = emitter.on("tick", &handler);
        guard.unsubscribe();
        guard.unsubscribe();

        assert_eq!(emitter.handler_count(&"tick"), 0);
    }

    #[test]
    fn covers_every_key_of_the_registration() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let handler = Handler::new(|_: &u32| {});

        let guard = emitter.on(["save", "autosave"], &handler);
        assert_eq!(emitter.handler_count(&"save"), 1);
        assert_eq!(emitter.handler_count(&"autosave"), 1);

        guard.unsubscribe();
        assert_eq!(emitter.handler_count(&"save"), 0);
        assert_eq!(emitter.handler_count(&"autosave"), 0);
    }

    #[test]
    fn leaves_other_handlers_alone() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let keep = Handler::new(|_: &u32| {});
        let drop_me = Handler::new(|_: &u32| {});

        emitter.on("tick", &keep);
        let guard = emitter.on("tick", &drop_me);
        guard.unsubscribe();

        assert_eq!(emitter.handler_count(&"tick"), 1);
    }

    #[test]
    fn wildcard_guard_removes_from_wildcard_slot() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let handler = WildcardHandler::new(|_: &&'static str, _: &u32| {});

        let guard = emitter.on_any(&handler);
        assert_eq!(emitter.wildcard_count(), 1);

        guard.unsubscribe();
        assert_eq!(emitter.wildcard_count(), 0);
    }

    #[test]
    fn no_op_after_emitter_is_dropped() {
        let emitter: Emitter<&'static str, u32> = Emitter::new();
        let handler = Handler::new(|_: &u32| {});
        let guard = emitter.on("tick", &handler);

        drop(emitter);
        // The guard holds only a weak reference; nothing to remove from.
        guard.unsubscribe();
    }
}
