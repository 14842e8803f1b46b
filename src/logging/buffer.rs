use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries retained before the oldest is evicted.
pub const LOG_BUFFER_CAPACITY: usize = 50;

/// Entries returned by [`ServerLogBuffer::entries`] when no limit is given.
pub const DEFAULT_LOG_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub scope: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// Bounded in-memory record of recent server events for the diagnostics
/// endpoint. Every recorded entry is also emitted through `tracing`.
#[derive(Debug)]
pub struct ServerLogBuffer {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl Default for ServerLogBuffer {
    fn default() -> Self {
        Self::new(LOG_BUFFER_CAPACITY)
    }
}

impl ServerLogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn record(
        &self,
        level: LogLevel,
        scope: &str,
        message: impl Into<String>,
        context: Option<serde_json::Value>,
    ) -> LogEntry {
        let entry = LogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            scope: scope.to_string(),
            message: message.into(),
            context,
        };

        match level {
            LogLevel::Debug => tracing::debug!(scope = %entry.scope, "{}", entry.message),
            LogLevel::Info => tracing::info!(scope = %entry.scope, "{}", entry.message),
            LogLevel::Warn => tracing::warn!(scope = %entry.scope, "{}", entry.message),
            LogLevel::Error => tracing::error!(scope = %entry.scope, "{}", entry.message),
        }

        // Poisoning leaves the queue intact.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry.clone());
        entry
    }

    pub fn info(&self, scope: &str, message: impl Into<String>) -> LogEntry {
        self.record(LogLevel::Info, scope, message, None)
    }

    pub fn warn(&self, scope: &str, message: impl Into<String>, context: Option<serde_json::Value>) -> LogEntry {
        self.record(LogLevel::Warn, scope, message, context)
    }

    pub fn error(&self, scope: &str, message: impl Into<String>, context: Option<serde_json::Value>) -> LogEntry {
        self.record(LogLevel::Error, scope, message, context)
    }

    /// Up to `limit` entries, newest first.
    pub fn entries(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
