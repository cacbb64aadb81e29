#![warn(missing_docs)]
//! Deterministic testing surfaces: scripted host doubles, a session event
//! stream and the metrics report headless sessions leave behind.

mod fixtures;
mod metrics;

use anyhow::{Context, Result};
use mdsurround_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use fixtures::*;
pub use metrics::*;

/// One environment transition observed during a session (biome change,
/// battle start, aurora spawn, ...).
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Tick on which the transition was observed.
    pub tick: SimTick,
    /// Transition kind, e.g. `battle_start`.
    pub kind: &'a str,
    /// Kind-specific detail.
    pub payload: &'a str,
}

/// Buffered newline-delimited JSON event log.
pub struct JsonlSink {
    out: BufWriter<File>,
    written: u64,
}

impl JsonlSink {
    /// Create (or truncate) the log at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one event as a single JSON line.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Events appended so far.
    pub fn events_written(&self) -> u64 {
        self.written
    }

    /// Push buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "surround-events-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write(&EventRecord {
            tick: SimTick(3),
            kind: "sound",
            payload: "ambient.forest",
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            tick: SimTick(4),
            kind: "battle",
            payload: "skirmish",
        })
        .expect("write succeeds");
        assert_eq!(sink.events_written(), 2);
        sink.flush().expect("flush succeeds");

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ambient.forest"));
        assert!(lines[1].contains("\"tick\":4"));
        let _ = fs::remove_file(path);
    }
}
