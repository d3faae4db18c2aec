//! Recorder Example
//!
//! Attaches the two built-in monitors: `Tracer` (logs dispatch to
//! `tracing`) and `Recorder` (writes each emission as a JSON line).
//!
//! Run with:
//!
//! ```sh
//! cargo run --example recorder --features recorder
//! ```

use crier::monitors::{Recorder, Tracer};
use crier::{Emitter, Handler};

#[derive(Debug, serde::Serialize)]
struct Reading {
    sensor: &'static str,
    value: f64,
}

fn main() -> crier::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let path = std::env::temp_dir().join("crier_readings.jsonl");

    let emitter: Emitter<String, Reading> = Emitter::builder()
        .monitor(Tracer)
        .monitor(Recorder::new(&path)?)
        .build();

    let handler = Handler::new(|r: &Reading| println!("{}: {:.1}", r.sensor, r.value));
    emitter.on("reading", &handler);

    emitter.emit(
        "reading",
        &Reading {
            sensor: "temperature",
            value: 22.5,
        },
    );
    emitter.emit(
        "reading",
        &Reading {
            sensor: "humidity",
            value: 45.0,
        },
    );

    println!("--- {} ---", path.display());
    print!("{}", std::fs::read_to_string(&path)?);
    Ok(())
}
