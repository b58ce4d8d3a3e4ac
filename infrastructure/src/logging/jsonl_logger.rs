//! JSONL file writer for flow events.
//!
//! Each [`FlowEvent`] is serialized as a single JSON line with a UTC
//! timestamp, appended via a buffered writer.

use intake_application::ports::flow_logger::{FlowEvent, FlowLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// One line of the flow log: the event plus when it happened.
#[derive(Serialize)]
struct FlowLogRecord<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a FlowEvent,
}

/// Flow logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes per line and on
/// `Drop` so a crash loses at most the line being written.
pub struct JsonlFlowLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlFlowLogger {
    /// Open (or create) the log file for appending.
    ///
    /// Creates parent directories as needed. Returns `None` when the file
    /// cannot be opened; flow logging then stays disabled rather than
    /// blocking startup.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create flow log directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open flow log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlowLogger for JsonlFlowLogger {
    fn log(&self, event: FlowEvent) {
        let record = FlowLogRecord {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event: &event,
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlFlowLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
