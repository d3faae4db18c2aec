#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Crier
//!
//! A synchronous publish/subscribe event emitter.
//!
//! Crier dispatches payloads to handlers keyed by an event-type identifier,
//! on the caller's stack, in registration order. Register with [`Emitter::on`],
//! remove with [`Emitter::off`] or the returned [`Unsubscribe`] guard, and
//! dispatch with [`Emitter::emit`]. Wildcard handlers ([`Emitter::on_any`])
//! observe every emission after the emitted key's own handlers.
//!
//! ## Quick Start
//!
//! ```rust
//! use crier::{Emitter, Handler, WildcardHandler};
//!
//! let emitter: Emitter<String, String> = Emitter::new();
//!
//! let greet = Handler::new(|user: &String| println!("welcome, {user}"));
//! let audit = WildcardHandler::new(|key: &String, _: &String| println!("[audit] {key}"));
//!
//! let guard = emitter.on("login", &greet);
//! let _wildcard = emitter.on_any(&audit);
//!
//! // Runs `greet`, then `audit`, synchronously, in that order.
//! emitter.emit("login", &"ada".to_owned());
//!
//! // Undo the registration; calling the guard again is a no-op.
//! guard.unsubscribe();
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Emitter`] | Registers handlers and dispatches emissions |
//! | [`Handler`] | Typed handler with reference identity for removal |
//! | [`WildcardHandler`] | Handler invoked for every emission, with the key |
//! | [`Registry`] | The exposed handler storage ([`Emitter::all`]) |
//! | [`Keys`] | One key or several, for multi-key registration |
//! | [`Unsubscribe`] | Idempotent undo token returned by `on`/`on_any` |
//! | [`EventKey`] | Bound alias for key types (blanket-implemented) |
//!
//! ## The registry is an escape hatch
//!
//! The handler registry is shared (`Rc<RefCell<_>>`) and public as
//! [`Emitter::all`]. Pre-seed it, hand it to several emitter handles, or
//! mutate it directly — every operation tolerates externally-mutated state.
//! See [`Registry`] for the aliasing contract.
//!
//! ## Execution model
//!
//! Everything is synchronous and single-threaded: `on`, `off`, and `emit`
//! run to completion on the caller's stack, and the emitter types are
//! deliberately `!Send`. Dispatch passes snapshot their handler sequence
//! first, so handlers may re-register, remove, or emit re-entrantly without
//! corrupting an in-flight pass. Handler panics are not caught.
//!
//! ## Features
//!
//! - **`monitoring`** - `Monitor` lifecycle hooks and the `Tracer` monitor
//!   for `tracing`-based visibility
//! - **`testing`** - In-memory `EmitLog` with query and spy utilities for
//!   asserting on dispatch (enables `monitoring`)
//! - **`recorder`** - `Recorder` monitor for writing emissions to a JSON
//!   Lines file (enables `monitoring`)
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - `login.rs` - typed plus wildcard handlers on one emitter
//! - `seeded.rs` - pre-populated shared registry and aliasing
//! - `recorder.rs` - monitoring with `Tracer` and `Recorder`

mod emitter;
mod emitter_builder;
mod error;
mod event_key;
mod handler;
mod keys;
mod registry;
mod unsubscribe;

#[cfg(feature = "monitoring")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitoring")))]
pub mod monitoring;

#[cfg(feature = "monitoring")]
#[cfg_attr(docsrs, doc(cfg(feature = "monitoring")))]
pub mod monitors;

#[cfg(feature = "testing")]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

pub use emitter::Emitter;
pub use emitter_builder::EmitterBuilder;
pub use error::Error;
pub use event_key::EventKey;
pub use handler::{Handler, WildcardHandler};
pub use keys::Keys;
pub use registry::{Registry, SharedRegistry};
pub use unsubscribe::Unsubscribe;

/// Convenience alias for `Result<T, crier::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
