//! Test utilities for observing and asserting on emitter dispatch.
//!
//! Enable with the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! crier = { version = "0.1", features = ["testing"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use crier::{Emitter, Handler};
//! use crier::testing::EmitLog;
//!
//! let emitter: Emitter<String, u32> = Emitter::new();
//! let log: EmitLog<String, u32> = EmitLog::new();
//! emitter.monitors().add(log.clone());
//!
//! emitter.on("tick", &Handler::new(|_: &u32| {}));
//! emitter.emit("tick", &1);
//! emitter.emit("tock", &2);
//!
//! // Query the recorded activity
//! assert_eq!(log.query().emissions().count(), 2);
//! assert_eq!(log.query().deliveries().count(), 1);
//!
//! // Or use a spy for a single key
//! let tick = log.spy("tick".to_owned());
//! assert!(tick.was_emitted());
//! assert_eq!(tick.delivery_count(), 1);
//! ```
//!
//! # Note
//!
//! These types record payloads by value (`E: Clone`) and use `Rc`
//! internally, so they are `!Send`. This is intentional — they are designed
//! for single-threaded test contexts only.

mod emit_entry;
mod emit_log;
mod emit_query;
mod key_spy;

pub use emit_entry::{EmitEntry, EntryKind};
pub use emit_log::EmitLog;
pub use emit_query::EmitQuery;
pub use key_spy::KeySpy;

pub(crate) type EmitRecords<K, E> = std::rc::Rc<Vec<EmitEntry<K, E>>>;
