use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::monitoring::{Monitor, Phase};
use crate::testing::{EmitEntry, EmitQuery, EntryKind, KeySpy};
use crate::EventKey;

/// A monitor that records every emission and delivery in memory.
///
/// Attach a clone to the emitter under test and query the recorded
/// activity afterwards. Payloads are stored by value, so `E: Clone` is
/// required here (and only here — the core emitter never clones payloads).
///
/// # Example
///
/// ```rust
/// use crier::{Emitter, Handler};
/// use crier::testing::EmitLog;
///
/// let emitter: Emitter<String, u32> = Emitter::new();
/// let log: EmitLog<String, u32> = EmitLog::new();
/// emitter.monitors().add(log.clone());
///
/// emitter.on("tick", &Handler::new(|_: &u32| {}));
/// emitter.emit("tick", &41);
///
/// assert_eq!(log.query().deliveries().payloads(), vec![41]);
/// ```
pub struct EmitLog<K: EventKey, E> {
    entries: Rc<RefCell<Vec<EmitEntry<K, E>>>>,
}

impl<K: EventKey, E> EmitLog<K, E> {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A query over a snapshot of the entries recorded so far.
    ///
    /// Entries recorded after this call are not visible to the returned
    /// query; take a fresh query to see them.
    #[must_use]
    pub fn query(&self) -> EmitQuery<K, E>
    where
        E: Clone,
    {
        EmitQuery::new(Rc::new(self.entries.borrow().clone()))
    }

    /// A spy over the recorded activity for one key.
    #[must_use]
    pub fn spy(&self, key: K) -> KeySpy<K, E>
    where
        E: Clone,
    {
        KeySpy::new(Rc::new(self.entries.borrow().clone()), key)
    }

    /// Number of recorded entries (emissions and deliveries).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<K: EventKey, E> Default for EmitLog<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones share the same underlying log.
impl<K: EventKey, E> Clone for EmitLog<K, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K: EventKey, E: Clone> Monitor<K, E> for EmitLog<K, E> {
    fn on_emit(&self, key: &K, event: &E) {
        self.entries.borrow_mut().push(EmitEntry::new(
            key.clone(),
            event.clone(),
            EntryKind::Emitted,
        ));
    }

    fn on_delivery(&self, key: &K, event: &E, phase: Phase) {
        self.entries.borrow_mut().push(EmitEntry::new(
            key.clone(),
            event.clone(),
            EntryKind::Delivered(phase),
        ));
    }
}

impl<K: EventKey, E> fmt::Debug for EmitLog<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitLog")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Emitter, Handler, WildcardHandler};

    fn emitter_with_log() -> (Emitter<&'static str, u32>, EmitLog<&'static str, u32>) {
        let emitter = Emitter::new();
        let log = EmitLog::new();
        emitter.monitors().add(log.clone());
        (emitter, log)
    }

    #[test]
    fn records_emissions_and_deliveries_in_order() {
        let (emitter, log) = emitter_with_log();

        emitter.on("tick", &Handler::new(|_: &u32| {}));
        emitter.on_any(&WildcardHandler::new(|_, _| {}));
        emitter.emit("tick", &1);

        let entries: Vec<EntryKind> = {
            let query = log.query();
            (0..log.len()).map(|i| query.nth(i).unwrap().kind()).collect()
        };
        assert_eq!(
            entries,
            vec![
                EntryKind::Emitted,
                EntryKind::Delivered(Phase::Typed),
                EntryKind::Delivered(Phase::Wildcard),
            ]
        );
    }

    #[test]
    fn query_is_a_snapshot() {
        let (emitter, log) = emitter_with_log();

        emitter.emit("tick", &1);
        let query = log.query();
        emitter.emit("tick", &2);

        assert_eq!(query.count(), 1);
        assert_eq!(log.query().count(), 2);
    }

    #[test]
    fn clear_forgets_recorded_entries() {
        let (emitter, log) = emitter_with_log();

        emitter.emit("tick", &1);
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
    }
}
