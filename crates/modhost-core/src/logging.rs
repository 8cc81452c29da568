//! Leveled log sink with an optional append-only file target.
//!
//! The sink always emits synchronously through `tracing` (the console
//! stream). A file target may additionally be attached once startup has
//! resolved where the log file lives; until then, and whenever attachment
//! fails, file writes are simply skipped. A write failure on an attached
//! file is reported to the console stream only, so a broken file handle can
//! never recurse back into the sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    /// Bracketed tag used in persisted log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Process-wide log sink shared by the loader and dispatchers.
pub struct LogSink {
    /// File target; `None` until attached. Set at most once, then only read.
    file: Mutex<Option<File>>,
}

impl LogSink {
    /// Create a sink with no file target. Console output works immediately.
    pub fn new() -> Self {
        Self {
            file: Mutex::new(None),
        }
    }

    /// Attach the append-only log file.
    ///
    /// The first successful attach wins; later calls leave the existing
    /// target in place.
    pub fn attach_file(&self, path: &Path) -> std::io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut slot = self.file.lock();
        if slot.is_none() {
            *slot = Some(file);
        }
        Ok(())
    }

    /// Whether a file target is currently attached.
    pub fn has_file(&self) -> bool {
        self.file.lock().is_some()
    }

    /// Emit a record at the given level.
    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(category = "mods", "{}", message),
            LogLevel::Info => tracing::info!(category = "mods", "{}", message),
            LogLevel::Error => tracing::error!(category = "mods", "{}", message),
        }

        let mut slot = self.file.lock();
        if let Some(file) = slot.as_mut() {
            let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            if let Err(err) = writeln!(file, "{stamp} [{}] {message}", level.tag()) {
                // Console stream only. Never back through the sink.
                tracing::error!(category = "mods", error = %err, "log file write failed");
            }
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
