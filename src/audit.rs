//! JSONL audit logging for shell-sentinel
//!
//! Records every gated command and its decision to a JSONL file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::summarize;
use crate::messages::ReasonKey;
use crate::output::{Action, Category, SecurityDecision};
use crate::parser;
use crate::rules::Severity;

/// File name of the audit log inside the data directory
pub const AUDIT_FILE_NAME: &str = "audit.jsonl";

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Ask,
    Blocked,
    Disabled,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    pub category: Category,

    pub severity: Severity,

    /// Template key of the reason (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonKey>,

    /// Executable of the command, or of its first part for compounds
    pub executable: String,

    /// Whether the command had several parts
    pub compound: bool,

    /// Truncated command text
    pub input_summary: String,

    /// Session ID (if provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from a command and its decision
    pub fn new(
        command: &str,
        decision: &SecurityDecision,
        session_id: Option<&str>,
        disabled: bool,
    ) -> Self {
        let level = if disabled {
            LogLevel::Disabled
        } else {
            match decision.action() {
                Action::Allow => LogLevel::Allowed,
                Action::Ask => LogLevel::Ask,
                Action::Block => LogLevel::Blocked,
            }
        };
        let parsed = parser::parse(command);

        Self {
            timestamp: Utc::now(),
            level,
            category: decision.category(),
            severity: decision.severity(),
            reason: decision.reason().map(|r| r.key),
            executable: parsed.executable().to_string(),
            compound: parsed.is_compound(),
            input_summary: summarize(command),
            session_id: session_id.map(str::to_string),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(path = %parent.display(), error = %e, "cannot create audit directory");
                }
            }

            match OpenOptions::new().create(true).append(true).open(p) {
                Ok(file) => Some(BufWriter::new(file)),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "cannot open audit log");
                    None
                }
            }
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_decision(
        &mut self,
        command: &str,
        decision: &SecurityDecision,
        session_id: Option<&str>,
        disabled: bool,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(command, decision, session_id, disabled);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
