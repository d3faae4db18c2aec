use std::fmt;

use crate::monitoring::{Monitor, Phase};
use crate::EventKey;

/// A monitor that logs emitter activity to the `tracing` crate.
///
/// Provides visibility into dispatch without custom code. Log levels:
/// - `trace` - handler registered/removed, per-handler delivery (high volume)
/// - `debug` - emission started
///
/// # Example
///
/// ```ignore
/// use crier::monitors::Tracer;
///
/// emitter.monitors().add(Tracer);
/// ```
#[derive(Debug)]
pub struct Tracer;

impl<K, E> Monitor<K, E> for Tracer
where
    K: EventKey,
    E: fmt::Debug,
{
    fn on_handler_registered(&self, key: &K) {
        tracing::trace!(key = ?key, "handler registered");
    }

    fn on_wildcard_registered(&self) {
        tracing::trace!("wildcard handler registered");
    }

    fn on_handler_removed(&self, key: &K) {
        tracing::trace!(key = ?key, "handler removed");
    }

    fn on_wildcard_removed(&self) {
        tracing::trace!("wildcard handler removed");
    }

    fn on_emit(&self, key: &K, event: &E) {
        tracing::debug!(key = ?key, event = ?event, "emit");
    }

    fn on_delivery(&self, key: &K, event: &E, phase: Phase) {
        tracing::trace!(key = ?key, event = ?event, phase = %phase, "delivered");
    }
}
