use std::sync::Arc;

/// The single error type for all crier operations.
///
/// The emitter's own operations (`on`, `off`, `emit`) are infallible by
/// contract — absent keys and missing handlers are silent no-ops, and
/// handler panics propagate uncaught. Errors come from the edges: monitors
/// that touch the filesystem (the `Recorder`, behind the `recorder`
/// feature) and user code wrapped via [`Error::external`]. Lower-layer
/// errors are mapped into variants of this enum so callers only need to
/// handle one error type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("External error: {0}")]
    External(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[source] Arc<std::io::Error>),

    #[cfg(feature = "recorder")]
    #[cfg_attr(docsrs, doc(cfg(feature = "recorder")))]
    #[error("Serialization error: {0}")]
    Serialize(#[source] Arc<serde_json::Error>),
}

impl Error {
    /// Wrap an arbitrary error from user code.
    pub fn external(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Arc::new(e))
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::External(a), Self::External(b)) => Arc::ptr_eq(a, b),
            (Self::Io(a), Self::Io(b)) => Arc::ptr_eq(a, b),
            #[cfg(feature = "recorder")]
            (Self::Serialize(a), Self::Serialize(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

#[cfg(feature = "recorder")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialize(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_wraps_and_displays_the_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::external(inner);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn equality_is_source_identity() {
        let a = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        let b = a.clone();
        assert_eq!(a, b);

        let c = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert_ne!(a, c);
    }
}
