use std::fmt;
use std::rc::Rc;

use crate::monitoring::Phase;
use crate::testing::{EmitEntry, EmitRecords, EntryKind};
use crate::EventKey;

type Filter<K, E> = Rc<dyn Fn(&EmitEntry<K, E>) -> bool>;

/// A composable query over recorded emitter activity.
///
/// `EmitQuery` provides a fluent API for filtering entries by key, kind,
/// and payload, with terminal operations for inspection. Obtain one from
/// [`EmitLog::query`](crate::testing::EmitLog::query).
///
/// # Example
///
/// ```ignore
/// let late_ticks = log.query()
///     .for_key("tick")
///     .deliveries()
///     .matching(|n| *n > 100)
///     .count();
/// ```
pub struct EmitQuery<K: EventKey, E> {
    entries: EmitRecords<K, E>,
    filters: Vec<Filter<K, E>>,
}

impl<K: EventKey, E> EmitQuery<K, E> {
    pub(crate) fn new(entries: EmitRecords<K, E>) -> Self {
        Self {
            entries,
            filters: Vec::new(),
        }
    }

    fn add_filter<F>(&mut self, filter: F)
    where
        F: Fn(&EmitEntry<K, E>) -> bool + 'static,
    {
        self.filters.push(Rc::new(filter));
    }

    fn apply_filters(&self) -> Vec<&EmitEntry<K, E>> {
        self.entries
            .iter()
            .filter(|e| self.filters.iter().all(|f| f(e)))
            .collect()
    }

    // ==================== Filters ====================

    /// Keep entries for one key.
    #[must_use]
    pub fn for_key(mut self, key: K) -> Self {
        self.add_filter(move |e| *e.key() == key);
        self
    }

    /// Keep only `Emitted` entries (one per `emit` call).
    #[must_use]
    pub fn emissions(mut self) -> Self {
        self.add_filter(|e| e.is_emission());
        self
    }

    /// Keep only `Delivered` entries (one per handler invocation).
    #[must_use]
    pub fn deliveries(mut self) -> Self {
        self.add_filter(|e| e.is_delivery());
        self
    }

    /// Keep only deliveries made by the typed pass.
    #[must_use]
    pub fn typed(mut self) -> Self {
        self.add_filter(|e| e.kind() == EntryKind::Delivered(Phase::Typed));
        self
    }

    /// Keep only deliveries made by the wildcard pass.
    #[must_use]
    pub fn wildcard(mut self) -> Self {
        self.add_filter(|e| e.kind() == EntryKind::Delivered(Phase::Wildcard));
        self
    }

    /// Keep entries whose payload matches a predicate.
    #[must_use]
    pub fn matching<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        self.add_filter(move |e| predicate(e.event()));
        self
    }

    // ==================== Terminal operations ====================

    /// Number of entries matching all filters.
    #[must_use]
    pub fn count(&self) -> usize {
        self.apply_filters().len()
    }

    /// Returns true if no entries match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apply_filters().is_empty()
    }

    /// Returns true if any entry matches.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.is_empty()
    }

    /// The first matching entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<EmitEntry<K, E>>
    where
        E: Clone,
    {
        self.apply_filters().first().cloned().cloned()
    }

    /// The last matching entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<EmitEntry<K, E>>
    where
        E: Clone,
    {
        self.apply_filters().last().cloned().cloned()
    }

    /// The nth matching entry (0-indexed), if any.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<EmitEntry<K, E>>
    where
        E: Clone,
    {
        self.apply_filters().get(index).cloned().cloned()
    }

    /// The payloads of all matching entries, in recorded order.
    #[must_use]
    pub fn payloads(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.apply_filters()
            .into_iter()
            .map(|e| e.event().clone())
            .collect()
    }

    /// The distinct keys of matching entries, in order of first occurrence.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        let mut seen = std::collections::HashSet::new();
        self.apply_filters()
            .into_iter()
            .filter_map(|e| {
                let key = e.key().clone();
                seen.insert(key.clone()).then_some(key)
            })
            .collect()
    }
}

impl<K: EventKey, E> Clone for EmitQuery<K, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            filters: self.filters.clone(),
        }
    }
}

impl<K: EventKey, E> fmt::Debug for EmitQuery<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitQuery")
            .field("records", &self.entries.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> EmitRecords<&'static str, u32> {
        Rc::new(vec![
            EmitEntry::new("tick", 1, EntryKind::Emitted),
            EmitEntry::new("tick", 1, EntryKind::Delivered(Phase::Typed)),
            EmitEntry::new("tick", 1, EntryKind::Delivered(Phase::Wildcard)),
            EmitEntry::new("tock", 2, EntryKind::Emitted),
            EmitEntry::new("tock", 2, EntryKind::Delivered(Phase::Wildcard)),
        ])
    }

    #[test]
    fn unfiltered_query_sees_every_entry() {
        let query = EmitQuery::new(records());
        assert_eq!(query.count(), 5);
        assert!(query.exists());
    }

    #[test]
    fn filters_compose() {
        let query = EmitQuery::new(records())
            .for_key("tick")
            .deliveries();
        assert_eq!(query.count(), 2);

        let wildcard_only = EmitQuery::new(records()).wildcard();
        assert_eq!(wildcard_only.count(), 2);

        let none = EmitQuery::new(records()).for_key("tick").matching(|v| *v > 1);
        assert!(none.is_empty());
    }

    #[test]
    fn terminals_preserve_recorded_order() {
        let query = EmitQuery::new(records()).emissions();
        assert_eq!(*query.first().unwrap().key(), "tick");
        assert_eq!(*query.last().unwrap().key(), "tock");
        assert!(query.nth(2).is_none());
        assert_eq!(query.payloads(), vec![1, 2]);
    }

    #[test]
    fn keys_are_deduplicated_in_first_seen_order() {
        let query = EmitQuery::new(records());
        assert_eq!(query.keys(), vec!["tick", "tock"]);
    }
}
