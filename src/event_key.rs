use std::fmt;
use std::hash::Hash;

/// Bound alias for event-type identifiers.
///
/// Keys classify emissions and serve as lookup keys in the
/// [`Registry`](crate::Registry), so they must be `Hash + Eq + Clone`.
/// The `Debug` bound keeps diagnostics and `tracing` output usable for any
/// key type. Blanket-implemented; never implement it by hand.
///
/// Common choices:
/// - `&'static str` or `String` for dynamic, caller-defined names
/// - a fieldless enum for a closed set of event types
///
/// # Example
///
/// ```rust
/// use crier::EventKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum ChatKey {
///     Message,
///     Join,
/// }
///
/// fn assert_key<K: EventKey>() {}
/// assert_key::<ChatKey>();
/// assert_key::<&'static str>();
/// assert_key::<String>();
/// ```
pub trait EventKey: Hash + Eq + Clone + fmt::Debug + 'static {}

impl<K: Hash + Eq + Clone + fmt::Debug + 'static> EventKey for K {}
