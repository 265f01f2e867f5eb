//! Activity logging: JSONL append-only event log with graceful degradation.

pub mod jsonl;

pub use jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};

use crate::core::config::LoggingConfig;

/// Session-owned activity log. Disabled logs accept and drop every entry.
pub struct ActivityLog {
    writer: Option<JsonlWriter>,
    recorded: u64,
}

impl ActivityLog {
    /// Open the log described by `config`.
    #[must_use]
    pub fn open(config: &LoggingConfig) -> Self {
        let writer = config
            .enabled
            .then(|| JsonlWriter::open(JsonlConfig::new(&config.jsonl_log)));
        Self {
            writer,
            recorded: 0,
        }
    }

    /// A log that records nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            writer: None,
            recorded: 0,
        }
    }

    pub fn record(&mut self, entry: &LogEntry) {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_entry(entry);
            self.recorded += 1;
        }
    }

    /// Entries handed to the writer so far.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush();
        }
    }
}
