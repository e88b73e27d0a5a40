//! Query transcript as JSON Lines.
//!
//! One line per [`QueryEvent`]: the event's object payload flattened next
//! to `type`, `seq` and `timestamp`. Non-object payloads go under `data`.
//! The file is opened in append mode so one transcript spans restarts;
//! `seq` restarts at 0 with each process.

use finquery_application::ports::query_logger::{QueryEvent, QueryLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    seq: u64,
    timestamp: String,
    #[serde(flatten)]
    body: Body,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body {
    Fields(Map<String, Value>),
    Wrapped { data: Value },
}

impl From<Value> for Body {
    fn from(payload: Value) -> Self {
        match payload {
            Value::Object(map) => Body::Fields(map),
            other => Body::Wrapped { data: other },
        }
    }
}

/// Appends query events to a `.jsonl` file.
pub struct JsonlQueryLogger {
    writer: Mutex<BufWriter<File>>,
    seq: AtomicU64,
    path: PathBuf,
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl JsonlQueryLogger {
    /// Open (or create) the transcript at `path`, creating parent
    /// directories. `None` if that fails; the failure is logged.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                seq: AtomicU64::new(0),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Query log {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueryLogger for JsonlQueryLogger {
    fn log(&self, event: QueryEvent) {
        let record = Record {
            event_type: event.event_type,
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body: event.payload.into(),
        };
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Dropping {} event: {}", event.event_type, e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Query log write failed: {}", e);
        }
    }
}
