//! Per-call diagnostics for absorbed failures.
//!
//! Field-level failures never fail a call. They are forwarded to the `log`
//! facade and collected here so a host bridge can surface them next to the
//! outputs of the call that produced them.

use serde::{Deserialize, Serialize};

/// Log level for host display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }
}

/// Entries collected during one `execute` call.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<LogEntry>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry and forward it to the `log` facade.
    pub fn push(&mut self, entry: LogEntry) {
        match entry.level {
            LogLevel::Info => log::info!("{}", entry.message),
            LogLevel::Warning => log::warn!("{}", entry.message),
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.push(LogEntry::info(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.push(LogEntry::warning(msg));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level == LogLevel::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
