use crate::{Emitter, EventKey, Registry, SharedRegistry};

#[cfg(feature = "monitoring")]
use std::rc::Rc;

#[cfg(feature = "monitoring")]
use crate::monitoring::Monitor;

/// Builder for an [`Emitter`] with a seeded registry and/or monitors.
///
/// Returned by [`Emitter::builder`]. Use it when construction involves more
/// than an empty registry; for the plain case, [`Emitter::new`] is shorter.
///
/// # Examples
///
/// ```rust
/// use crier::{Emitter, Handler, Registry};
///
/// let mut seed: Registry<String, u32> = Registry::new();
/// seed.insert("tick".to_owned(), Handler::new(|n: &u32| println!("tick {n}")));
///
/// let emitter = Emitter::builder().seed(seed).build();
/// emitter.emit("tick", &1);
/// ```
pub struct EmitterBuilder<K: EventKey, E> {
    registry: Option<SharedRegistry<K, E>>,
    #[cfg(feature = "monitoring")]
    monitors: Vec<Rc<dyn Monitor<K, E>>>,
}

impl<K: EventKey, E> EmitterBuilder<K, E> {
    pub(crate) fn new() -> Self {
        Self {
            registry: None,
            #[cfg(feature = "monitoring")]
            monitors: Vec::new(),
        }
    }

    /// Adopt an existing shared registry.
    ///
    /// Same aliasing semantics as [`Emitter::with_registry`]: the registry
    /// is used directly, not copied.
    pub fn registry(mut self, registry: SharedRegistry<K, E>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Seed the emitter with an owned registry.
    ///
    /// Shorthand for `registry(seed.into_shared())` when no other handle to
    /// the registry is needed.
    pub fn seed(self, registry: Registry<K, E>) -> Self {
        self.registry(registry.into_shared())
    }

    /// Attach a monitor to the emitter being built.
    ///
    /// May be called multiple times; monitors are notified in attachment
    /// order.
    #[cfg(feature = "monitoring")]
    #[cfg_attr(docsrs, doc(cfg(feature = "monitoring")))]
    pub fn monitor(mut self, monitor: impl Monitor<K, E> + 'static) -> Self {
        self.monitors.push(Rc::new(monitor));
        self
    }

    /// Build the emitter.
    pub fn build(self) -> Emitter<K, E> {
        let emitter = match self.registry {
            Some(registry) => Emitter::with_registry(registry),
            None => Emitter::new(),
        };
        #[cfg(feature = "monitoring")]
        for monitor in self.monitors {
            emitter.monitors().add_shared(monitor);
        }
        emitter
    }
}

impl<K: EventKey, E> Default for EmitterBuilder<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::{Emitter, Handler, Registry};

    #[test]
    fn build_without_options_matches_new() {
        let emitter: Emitter<&'static str, u32> = Emitter::builder().build();
        assert!(emitter.all.borrow().is_empty());
    }

    #[test]
    fn seeded_registry_dispatches_immediately() {
        let calls = Rc::new(Cell::new(0));
        let calls_in = calls.clone();

        let mut seed: Registry<&'static str, u32> = Registry::new();
        seed.insert(
            "tick",
            Handler::new(move |_: &u32| calls_in.set(calls_in.get() + 1)),
        );

        let emitter = Emitter::builder().seed(seed).build();
        emitter.emit("tick", &1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn adopted_registry_stays_shared() {
        let shared = Registry::<&'static str, u32>::new().into_shared();
        let emitter = Emitter::builder().registry(shared.clone()).build();

        let handler = Handler::new(|_: &u32| {});
        emitter.on("tick", &handler);
        assert_eq!(shared.borrow().handler_count(&"tick"), 1);
    }
}
