use crate::monitoring::Phase;
use crate::EventKey;

/// What a recorded entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// An `emit` call, recorded before any handler ran.
    Emitted,
    /// A single handler invocation within an `emit` pass.
    Delivered(Phase),
}

/// One recorded piece of emitter activity.
///
/// Produced by [`EmitLog`](crate::testing::EmitLog): one `Emitted` entry per
/// `emit` call, followed by one `Delivered` entry per handler invocation.
#[derive(Debug, Clone)]
pub struct EmitEntry<K: EventKey, E> {
    key: K,
    event: E,
    kind: EntryKind,
}

impl<K: EventKey, E> EmitEntry<K, E> {
    pub(crate) fn new(key: K, event: E, kind: EntryKind) -> Self {
        Self { key, event, kind }
    }

    /// The key that fired.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The recorded payload.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// Whether this entry is an emission or a delivery.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns true for `Emitted` entries.
    pub fn is_emission(&self) -> bool {
        matches!(self.kind, EntryKind::Emitted)
    }

    /// Returns true for `Delivered` entries.
    pub fn is_delivery(&self) -> bool {
        matches!(self.kind, EntryKind::Delivered(_))
    }
}
