//! Login Example
//!
//! The smallest useful setup: two typed handlers and one wildcard handler
//! on a single emitter.
//!
//! Demonstrates:
//! - registration order is invocation order
//! - wildcard handlers fire after the emitted key's handlers, with the key
//! - the `Unsubscribe` guard removes exactly what was registered

use crier::{Emitter, Handler, WildcardHandler};

#[derive(Debug)]
struct Login {
    user: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let emitter: Emitter<&'static str, Login> = Emitter::new();

    let announce = Handler::new(|login: &Login| println!("welcome, {}", login.user));
    let count = Handler::new(|login: &Login| println!("({} logged in)", login.user));
    let audit = WildcardHandler::new(|key: &&'static str, login: &Login| {
        println!("[audit] {key}: {login:?}");
    });

    let guard = emitter.on("login", &announce);
    emitter.on("login", &count);
    emitter.on_any(&audit);

    // announce, count, audit — in that order.
    emitter.emit("login", &Login { user: "ada".into() });

    // Only `announce` goes away; `count` and the wildcard stay.
    guard.unsubscribe();
    emitter.emit("login", &Login { user: "bob".into() });

    // No handlers for this key, but the wildcard still sees it.
    emitter.emit("logout", &Login { user: "ada".into() });
}
