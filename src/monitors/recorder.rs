use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::monitoring::Monitor;
use crate::{EventKey, Result};

/// A monitor that records emissions to a file in JSON Lines format.
///
/// Each `emit` call is written as one JSON object — `{"key": .., "event": ..}`
/// — on its own line, making the output easy to parse and stream. Lines are
/// flushed immediately for reliability (not optimized for high-throughput).
/// Write failures are logged via `tracing` and never interrupt dispatch.
///
/// # Example
///
/// ```ignore
/// let recorder = Recorder::new("emissions.jsonl")?;
/// emitter.monitors().add(recorder);
/// ```
#[derive(Debug)]
pub struct Recorder {
    writer: RefCell<BufWriter<File>>,
}

#[derive(Serialize)]
struct Record<'a, K, E> {
    key: &'a K,
    event: &'a E,
}

impl Recorder {
    /// Create a new recorder that writes to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be created.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: RefCell::new(BufWriter::new(file)),
        })
    }

    fn write<K: Serialize, E: Serialize>(&self, key: &K, event: &E) -> Result<()> {
        let mut writer = self.writer.borrow_mut();
        serde_json::to_writer(&mut *writer, &Record { key, event })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl<K, E> Monitor<K, E> for Recorder
where
    K: EventKey + Serialize,
    E: Serialize,
{
    fn on_emit(&self, key: &K, event: &E) {
        if let Err(e) = self.write(key, event) {
            tracing::warn!(key = ?key, error = %e, "recorder failed to write emission");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn recorder_writes_one_json_line_per_emission() {
        let path = std::env::temp_dir().join("crier_recorder_test.jsonl");
        let recorder = Recorder::new(&path).expect("failed to create recorder");

        #[derive(serde::Serialize)]
        struct Login {
            user: &'static str,
        }

        Monitor::<String, Login>::on_emit(&recorder, &"login".to_owned(), &Login { user: "ada" });
        Monitor::<String, Login>::on_emit(&recorder, &"login".to_owned(), &Login { user: "bob" });

        let mut file = File::open(&path).expect("failed to open log file");
        let mut content = String::new();
        file.read_to_string(&mut content)
            .expect("failed to read log file");

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ada"));
        assert!(lines[1].contains("bob"));

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["key"], "login");
        assert_eq!(parsed["event"]["user"], "ada");

        let _ = std::fs::remove_file(&path);
    }
}
