use std::fmt;

use crate::testing::{EmitQuery, EmitRecords};
use crate::EventKey;

/// A spy for observing the recorded activity of a single key.
///
/// Provides shorthand assertions over an [`EmitQuery`] pre-filtered to one
/// key. Obtain one from [`EmitLog::spy`](crate::testing::EmitLog::spy).
pub struct KeySpy<K: EventKey, E> {
    query: EmitQuery<K, E>,
}

impl<K: EventKey, E> KeySpy<K, E> {
    pub(crate) fn new(records: EmitRecords<K, E>, key: K) -> Self {
        Self {
            query: EmitQuery::new(records).for_key(key),
        }
    }

    /// Returns true if the key was emitted at least once.
    #[must_use]
    pub fn was_emitted(&self) -> bool {
        self.query.clone().emissions().exists()
    }

    /// Number of `emit` calls for this key.
    #[must_use]
    pub fn emit_count(&self) -> usize {
        self.query.clone().emissions().count()
    }

    /// Number of handler invocations for this key, both passes included.
    #[must_use]
    pub fn delivery_count(&self) -> usize {
        self.query.clone().deliveries().count()
    }

    /// Number of typed-pass handler invocations for this key.
    #[must_use]
    pub fn typed_delivery_count(&self) -> usize {
        self.query.clone().typed().count()
    }

    /// Number of wildcard-pass handler invocations for this key.
    #[must_use]
    pub fn wildcard_delivery_count(&self) -> usize {
        self.query.clone().wildcard().count()
    }

    /// A query for further filtering this key's entries.
    #[must_use]
    pub fn events(&self) -> EmitQuery<K, E> {
        self.query.clone()
    }
}

impl<K: EventKey, E> fmt::Debug for KeySpy<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySpy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::monitoring::Phase;
    use crate::testing::{EmitEntry, EntryKind};

    use super::*;

    fn records() -> EmitRecords<&'static str, u32> {
        Rc::new(vec![
            EmitEntry::new("tick", 1, EntryKind::Emitted),
            EmitEntry::new("tick", 1, EntryKind::Delivered(Phase::Typed)),
            EmitEntry::new("tick", 1, EntryKind::Delivered(Phase::Typed)),
            EmitEntry::new("tick", 1, EntryKind::Delivered(Phase::Wildcard)),
            EmitEntry::new("tock", 2, EntryKind::Emitted),
        ])
    }

    #[test]
    fn spy_counts_only_its_key() {
        let spy = KeySpy::new(records(), "tick");
        assert!(spy.was_emitted());
        assert_eq!(spy.emit_count(), 1);
        assert_eq!(spy.delivery_count(), 3);
        assert_eq!(spy.typed_delivery_count(), 2);
        assert_eq!(spy.wildcard_delivery_count(), 1);
    }

    #[test]
    fn spy_on_silent_key_reports_zero() {
        let spy = KeySpy::new(records(), "never");
        assert!(!spy.was_emitted());
        assert_eq!(spy.emit_count(), 0);
        assert_eq!(spy.delivery_count(), 0);
    }

    #[test]
    fn events_returns_a_filterable_query() {
        let spy = KeySpy::new(records(), "tick");
        assert_eq!(spy.events().deliveries().count(), 3);
    }
}
