//! Seeded Registry Example
//!
//! The registry is a shared, exposed structure, not a hidden field. This
//! demo pre-populates one, hands it to an emitter, and keeps mutating it
//! from the outside.
//!
//! Demonstrates:
//! - pre-seeding a `Registry` before the emitter exists
//! - `Emitter::with_registry` adopts the registry by reference, not by copy
//! - mutation through any handle (emitter or external `Rc`) is visible to all

use crier::{Emitter, Handler, Registry};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut seed: Registry<String, u64> = Registry::new();
    seed.insert(
        "block".to_owned(),
        Handler::new(|height: &u64| println!("block #{height}")),
    );

    let shared = seed.into_shared();
    let emitter = Emitter::with_registry(shared.clone());

    // The seeded handler fires without any `on` call.
    emitter.emit("block", &1);

    // Mutate through the external handle: the emitter sees it immediately.
    shared.borrow_mut().insert(
        "block".to_owned(),
        Handler::new(|height: &u64| println!("  confirmed at #{height}")),
    );
    emitter.emit("block", &2);

    // Mutate through the emitter: the external handle sees it too.
    emitter.clear(&"block".to_owned());
    println!(
        "handlers left: {}",
        shared.borrow().handler_count(&"block".to_owned())
    );
}
