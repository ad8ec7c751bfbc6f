//! Shared surface for messages shown to the end user.
//!
//! Components that can fail in a user-visible way take an optional
//! [`MessageSink`]. How a message is rendered belongs to the sink.

use colored::Colorize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait MessageSink: Send + Sync {
    fn show(&self, message: &str, severity: Severity);
}

/// Writes messages to stderr, coloured by severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn show(&self, message: &str, severity: Severity) {
        let line = match severity {
            Severity::Info => message.normal(),
            Severity::Success => message.green(),
            Severity::Warning => message.yellow(),
            Severity::Error => message.red().bold(),
        };
        eprintln!("{}", line);
    }
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for MemorySink {
    fn show(&self, message: &str, severity: Severity) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((message.to_string(), severity));
        }
    }
}
