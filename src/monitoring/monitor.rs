use std::fmt;

use crate::EventKey;

/// Which dispatch pass delivered a payload to a handler.
///
/// Every `emit` call runs two passes: the emitted key's typed handlers
/// first, then the wildcard handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The handler was registered under the emitted key.
    Typed,
    /// The handler was registered for all keys.
    Wildcard,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Typed => write!(f, "typed"),
            Phase::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// Trait for observing emitter activity.
///
/// Implement this trait to receive callbacks for registration, removal, and
/// dispatch. All methods have default no-op implementations, so you only
/// need to override the ones you care about.
///
/// Monitors run on the caller's stack and need not be `Send` — the emitter
/// is single-threaded by design.
///
/// # Example
///
/// ```rust
/// use crier::monitoring::{Monitor, Phase};
///
/// struct EmitLogger;
///
/// impl Monitor<String, String> for EmitLogger {
///     fn on_emit(&self, key: &String, _event: &String) {
///         println!("[emit] {key}");
///     }
///
///     fn on_delivery(&self, key: &String, _event: &String, phase: Phase) {
///         println!("[delivery] {key} ({phase})");
///     }
/// }
/// ```
///
/// # Callback order
///
/// For a single `emit` with N type-matched and M wildcard handlers:
/// 1. `on_emit` — once, before any handler runs
/// 2. `on_delivery(.., Phase::Typed)` — N times, one after each handler
/// 3. `on_delivery(.., Phase::Wildcard)` — M times, one after each handler
///
/// A handler that panics unwinds past the emitter, so its `on_delivery`
/// (and any later ones) never fire.
pub trait Monitor<K: EventKey, E> {
    /// Called when a typed handler is registered under a key.
    ///
    /// Fires once per key for a multi-key registration.
    fn on_handler_registered(&self, key: &K) {
        let _k = key;
    }

    /// Called when a wildcard handler is registered.
    fn on_wildcard_registered(&self) {}

    /// Called when a typed handler is removed from a key.
    ///
    /// Fires for `off`, for `Unsubscribe`, and once per removed handler for
    /// `clear`.
    fn on_handler_removed(&self, key: &K) {
        let _k = key;
    }

    /// Called when a wildcard handler is removed.
    fn on_wildcard_removed(&self) {}

    /// Called once per `emit`, before any handler runs.
    fn on_emit(&self, key: &K, event: &E) {
        let _k = key;
        let _e = event;
    }

    /// Called after each handler invocation of an `emit` pass.
    fn on_delivery(&self, key: &K, event: &E, phase: Phase) {
        let _k = key;
        let _e = event;
        let _p = phase;
    }
}
