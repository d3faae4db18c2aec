//! Monitoring API for observing emitter activity.
//!
//! Enable with the `monitoring` feature:
//!
//! ```toml
//! [dependencies]
//! crier = { version = "0.1", features = ["monitoring"] }
//! ```
//!
//! # Overview
//!
//! Monitors receive callbacks for the emitter lifecycle:
//! - handler registered / removed (typed and wildcard)
//! - emission started
//! - payload delivered to a handler (with the dispatch [`Phase`])
//!
//! Callbacks run synchronously, inline with the operation that triggered
//! them, and outside any registry borrow — a monitor may inspect the
//! emitter it observes. Monitors observe; they are not a dispatch
//! mechanism.
//!
//! # Example
//!
//! ```rust
//! use crier::{Emitter, Handler};
//! use crier::monitoring::{Monitor, Phase};
//!
//! struct DeliveryCounter(std::cell::Cell<usize>);
//!
//! impl Monitor<String, u32> for DeliveryCounter {
//!     fn on_delivery(&self, _key: &String, _event: &u32, _phase: Phase) {
//!         self.0.set(self.0.get() + 1);
//!     }
//! }
//!
//! let emitter: Emitter<String, u32> = Emitter::new();
//! emitter.monitors().add(DeliveryCounter(Default::default()));
//! ```

mod monitor;
mod set;

/// Unique identifier for a registered monitor.
pub type MonitorId = u16;

pub use monitor::{Monitor, Phase};
pub use set::MonitorSet;
