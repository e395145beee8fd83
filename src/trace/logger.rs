use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::trace::trace::EditorEvent;

// Actions that end an authoring cycle; the buffer is written out after them.
const FLUSH_ACTIONS: &[&str] = &["commit", "generate_failed"];

struct TraceFile {
    path: PathBuf,
    writer: BufWriter<File>,
    events: u64,
}

/// Buffered JSONL sink for editor events, one session per logger.
///
/// Events are buffered and written out when an authoring cycle ends (a
/// commit or a failed Generate), on `flush`, and on drop. A logger whose
/// file could not be opened stays usable and drops events.
pub struct TraceLogger {
    file: Option<Mutex<TraceFile>>,
}

impl TraceLogger {
    /// Open `path` for appending; an existing session log is kept.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => {
                log::debug!("tracing editor events to {}", path.display());
                Self {
                    file: Some(Mutex::new(TraceFile {
                        path: path.to_path_buf(),
                        writer: BufWriter::new(f),
                        events: 0,
                    })),
                }
            }
            Err(e) => {
                log::warn!("could not open trace file '{}': {}", path.display(), e);
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Events logged by this logger so far.
    pub fn events_logged(&self) -> u64 {
        self.with_file(|f| f.events).unwrap_or(0)
    }

    pub fn log(&self, event: &EditorEvent) {
        if self.file.is_none() {
            return;
        }

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                log::warn!("failed to serialize trace event: {}", e);
                return;
            }
        };

        let ends_cycle = FLUSH_ACTIONS.contains(&event.action.as_str());
        self.with_file(|f| {
            if let Err(e) = writeln!(f.writer, "{}", json) {
                log::warn!("failed to write trace event to {}: {}", f.path.display(), e);
                return;
            }
            f.events += 1;
            if ends_cycle {
                flush_file(f);
            }
        });
    }

    /// Write buffered events to disk.
    pub fn flush(&self) {
        self.with_file(flush_file);
    }

    fn with_file<R>(&self, op: impl FnOnce(&mut TraceFile) -> R) -> Option<R> {
        let file_mutex = self.file.as_ref()?;
        match file_mutex.lock() {
            Ok(mut f) => Some(op(&mut f)),
            Err(e) => {
                log::warn!("trace logger lock poisoned: {}", e);
                None
            }
        }
    }
}

fn flush_file(f: &mut TraceFile) {
    if let Err(e) = f.writer.flush() {
        log::warn!("failed to flush trace file {}: {}", f.path.display(), e);
    }
}
