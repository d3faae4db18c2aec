use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::monitoring::{Monitor, MonitorId};
use crate::EventKey;

struct Inner<K: EventKey, E> {
    monitors: Vec<(MonitorId, Rc<dyn Monitor<K, E>>)>,
    next_id: MonitorId,
    paused: bool,
}

/// The monitors attached to an emitter.
///
/// Access via [`Emitter::monitors()`](crate::Emitter::monitors). Cheap to
/// clone; clones share the same set. Monitors are notified in attachment
/// order, synchronously, from whichever emitter operation triggered the
/// callback.
///
/// # Example
///
/// ```ignore
/// let set = emitter.monitors();
///
/// // Attach a monitor, keep the id for later removal
/// let id = set.add(Tracer);
///
/// // Temporarily silence all monitors
/// set.pause();
/// set.resume();
///
/// set.remove(id);
/// ```
pub struct MonitorSet<K: EventKey, E> {
    inner: Rc<RefCell<Inner<K, E>>>,
}

impl<K: EventKey, E> MonitorSet<K, E> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                monitors: Vec::new(),
                next_id: 0,
                paused: false,
            })),
        }
    }

    /// Attach a monitor and return its id.
    pub fn add(&self, monitor: impl Monitor<K, E> + 'static) -> MonitorId {
        self.add_shared(Rc::new(monitor))
    }

    pub(crate) fn add_shared(&self, monitor: Rc<dyn Monitor<K, E>>) -> MonitorId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.monitors.push((id, monitor));
        id
    }

    /// Detach a monitor by its id. No-op for unknown ids.
    pub fn remove(&self, id: MonitorId) {
        self.inner.borrow_mut().monitors.retain(|(i, _)| *i != id);
    }

    /// Stop notifying monitors. Emitter operations are unaffected.
    pub fn pause(&self) {
        self.inner.borrow_mut().paused = true;
    }

    /// Resume notifying monitors.
    pub fn resume(&self) {
        self.inner.borrow_mut().paused = false;
    }

    /// Returns true if callbacks will currently be delivered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.paused && !inner.monitors.is_empty()
    }

    /// Number of attached monitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().monitors.len()
    }

    /// Returns true if no monitors are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().monitors.is_empty()
    }

    /// Invoke a callback on every attached monitor, in attachment order.
    ///
    /// Works over a snapshot, so a monitor may add or remove monitors from
    /// within a callback without affecting the in-flight notification.
    pub(crate) fn notify(&self, f: impl Fn(&dyn Monitor<K, E>)) {
        let snapshot: Vec<Rc<dyn Monitor<K, E>>> = {
            let inner = self.inner.borrow();
            if inner.paused || inner.monitors.is_empty() {
                return;
            }
            inner.monitors.iter().map(|(_, m)| Rc::clone(m)).collect()
        };
        for monitor in snapshot {
            f(&*monitor);
        }
    }
}

impl<K: EventKey, E> Clone for MonitorSet<K, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: EventKey, E> fmt::Debug for MonitorSet<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorSet")
            .field("monitors", &self.len())
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Named(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl Monitor<&'static str, u32> for Named {
        fn on_emit(&self, _key: &&'static str, _event: &u32) {
            self.1.borrow_mut().push(self.0);
        }
    }

    fn set() -> MonitorSet<&'static str, u32> {
        MonitorSet::new()
    }

    #[test]
    fn notify_runs_in_attachment_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let set = set();
        set.add(Named("first", calls.clone()));
        set.add(Named("second", calls.clone()));

        set.notify(|m| m.on_emit(&"k", &1));
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn removed_monitor_is_not_notified() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let set = set();
        let id = set.add(Named("gone", calls.clone()));
        set.add(Named("kept", calls.clone()));

        set.remove(id);
        set.notify(|m| m.on_emit(&"k", &1));
        assert_eq!(*calls.borrow(), vec!["kept"]);
    }

    #[test]
    fn paused_set_is_silent() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let set = set();
        set.add(Named("m", calls.clone()));

        set.pause();
        assert!(!set.is_active());
        set.notify(|m| m.on_emit(&"k", &1));
        assert!(calls.borrow().is_empty());

        set.resume();
        assert!(set.is_active());
        set.notify(|m| m.on_emit(&"k", &1));
        assert_eq!(*calls.borrow(), vec!["m"]);
    }

    #[test]
    fn empty_set_is_inactive() {
        assert!(!set().is_active());
        assert!(set().is_empty());
    }

    #[test]
    fn monitor_may_mutate_the_set_during_notification() {
        struct SelfRemover {
            set: MonitorSet<&'static str, u32>,
            id: RefCell<Option<MonitorId>>,
        }

        impl Monitor<&'static str, u32> for SelfRemover {
            fn on_emit(&self, _key: &&'static str, _event: &u32) {
                if let Some(id) = *self.id.borrow() {
                    self.set.remove(id);
                }
            }
        }

        let set = set();
        let remover = Rc::new(SelfRemover {
            set: set.clone(),
            id: RefCell::new(None),
        });
        let id = set.add_shared(remover.clone());
        *remover.id.borrow_mut() = Some(id);

        // Removal from within the callback must not disturb the snapshot.
        set.notify(|m| m.on_emit(&"k", &1));
        assert!(set.is_empty());
    }
}
