use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{EventKey, Handler, WildcardHandler};

/// The registry as the emitter holds it: shared, mutable, reference-counted.
///
/// Every clone of this `Rc` addresses the same live registry. Mutation
/// through any clone is visible to the emitter on the next operation.
pub type SharedRegistry<K, E> = Rc<RefCell<Registry<K, E>>>;

/// Handler storage for an [`Emitter`](crate::Emitter).
///
/// Both fields are public by contract: the registry is an intentional escape
/// hatch for pre-seeding, introspection, and bulk mutation, not a private
/// structure. The emitter tolerates any state a caller leaves behind — a
/// missing key, an emptied sequence, or handlers inserted directly.
///
/// Typed handlers live in `handlers`, keyed by event type, each sequence in
/// registration order. Wildcard handlers have their own dedicated slot
/// (`wildcard`) rather than a reserved key, so no key a caller picks can
/// collide with them.
///
/// # Example
///
/// ```rust
/// use crier::{Emitter, Handler, Registry};
///
/// let mut registry: Registry<String, u32> = Registry::new();
/// registry.insert("tick".to_owned(), Handler::new(|n: &u32| println!("tick {n}")));
///
/// let shared = registry.into_shared();
/// let emitter = Emitter::with_registry(shared.clone());
///
/// emitter.emit("tick", &1);
/// assert_eq!(shared.borrow().handler_count(&"tick".to_owned()), 1);
/// ```
pub struct Registry<K: EventKey, E> {
    /// Typed handler sequences. Order within a sequence is invocation order.
    pub handlers: HashMap<K, Vec<Handler<E>>>,
    /// The wildcard sequence, invoked after the typed pass of every emission.
    pub wildcard: Vec<WildcardHandler<K, E>>,
}

impl<K: EventKey, E> Registry<K, E> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            wildcard: Vec::new(),
        }
    }

    /// Wrap this registry in the shared form the emitter uses.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry<K, E> {
        Rc::new(RefCell::new(self))
    }

    /// Append a typed handler under a key, creating the sequence if absent.
    ///
    /// Useful for pre-seeding a registry before handing it to
    /// [`Emitter::with_registry`](crate::Emitter::with_registry).
    pub fn insert(&mut self, key: K, handler: Handler<E>) {
        self.handlers.entry(key).or_default().push(handler);
    }

    /// Append a wildcard handler.
    pub fn insert_wildcard(&mut self, handler: WildcardHandler<K, E>) {
        self.wildcard.push(handler);
    }

    /// Number of typed handlers registered under a key.
    ///
    /// A key with an emptied sequence counts the same as an absent key.
    #[must_use]
    pub fn handler_count(&self, key: &K) -> usize {
        self.handlers.get(key).map_or(0, Vec::len)
    }

    /// Number of wildcard handlers.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.wildcard.len()
    }

    /// Total handlers across all keys, wildcard included.
    #[must_use]
    pub fn total_handlers(&self) -> usize {
        self.handlers.values().map(Vec::len).sum::<usize>() + self.wildcard.len()
    }

    /// Returns true if no handlers are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_handlers() == 0
    }
}

impl<K: EventKey, E> Default for Registry<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKey, E> From<HashMap<K, Vec<Handler<E>>>> for Registry<K, E> {
    fn from(handlers: HashMap<K, Vec<Handler<E>>>) -> Self {
        Self {
            handlers,
            wildcard: Vec::new(),
        }
    }
}

// Fields hold closures, so Debug prints shape, not contents.
impl<K: EventKey, E> fmt::Debug for Registry<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.handlers.len())
            .field(
                "typed_handlers",
                &self.handlers.values().map(Vec::len).sum::<usize>(),
            )
            .field("wildcard_handlers", &self.wildcard.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn noop() -> Handler<u32> {
        Handler::new(|_: &u32| {})
    }

    #[test]
    fn new_registry_is_empty() {
        let registry: Registry<String, u32> = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.total_handlers(), 0);
    }

    #[test]
    fn insert_creates_sequence_and_appends() {
        let mut registry: Registry<&'static str, u32> = Registry::new();
        registry.insert("tick", noop());
        registry.insert("tick", noop());

        assert_eq!(registry.handler_count(&"tick"), 2);
        assert_eq!(registry.handler_count(&"tock"), 0);
    }

    #[test]
    fn wildcard_slot_is_counted_separately() {
        let mut registry: Registry<&'static str, u32> = Registry::new();
        registry.insert("tick", noop());
        registry.insert_wildcard(WildcardHandler::new(|_, _| {}));

        assert_eq!(registry.handler_count(&"tick"), 1);
        assert_eq!(registry.wildcard_count(), 1);
        assert_eq!(registry.total_handlers(), 2);
    }

    #[test]
    fn from_map_adopts_sequences() {
        let mut map: HashMap<&'static str, Vec<Handler<u32>>> = HashMap::new();
        map.insert("tick", vec![noop(), noop()]);

        let registry = Registry::from(map);
        assert_eq!(registry.handler_count(&"tick"), 2);
        assert_eq!(registry.wildcard_count(), 0);
    }

    #[test]
    fn emptied_sequence_counts_as_zero() {
        let mut registry: Registry<&'static str, u32> = Registry::new();
        registry.insert("tick", noop());
        registry.handlers.get_mut(&"tick").unwrap().clear();

        assert_eq!(registry.handler_count(&"tick"), 0);
        assert!(registry.is_empty());
        // The key survives, only its sequence was emptied.
        assert!(registry.handlers.contains_key(&"tick"));
    }
}
