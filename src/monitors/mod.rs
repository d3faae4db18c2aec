//! Built-in monitors.
//!
//! - [`Tracer`] logs emitter activity to the `tracing` crate.
//! - [`Recorder`] (feature `recorder`) writes each emission as a JSON line.

mod tracer;

#[cfg(feature = "recorder")]
mod recorder;

pub use tracer::Tracer;

#[cfg(feature = "recorder")]
#[cfg_attr(docsrs, doc(cfg(feature = "recorder")))]
pub use recorder::Recorder;
