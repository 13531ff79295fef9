//! Security configuration for shell-sentinel
//!
//! [`SecurityConfig`] is the tunable rule set the policy engine reads.
//! [`ConfigStore`] persists it as a commented JSON document and merges user
//! edits field by field, so a broken field only ever falls back to its
//! default.

pub mod document;
pub mod merge;
pub mod store;

pub use store::ConfigStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::rules::severity;

/// Upper bound accepted for `maxCommandLength`
pub const MAX_COMMAND_LENGTH_LIMIT: usize = 10_000;

/// How each dangerous-command severity and blacklist hit is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPolicy {
    /// Carried for configuration compatibility. Critical dangerous commands
    /// always ask and blacklist hits follow `ask_for_blacklist`.
    pub block_critical: bool,

    /// Ask instead of block for medium-severity dangerous commands
    pub ask_for_medium: bool,

    /// Ask instead of block for high-severity dangerous commands
    pub ask_for_high: bool,

    /// Ask instead of block when a blacklist pattern matches
    pub ask_for_blacklist: bool,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            block_critical: true,
            ask_for_medium: true,
            ask_for_high: true,
            ask_for_blacklist: false,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    /// Master switch; when false every command is allowed
    pub enable_command_security: bool,

    /// Require a whitelist match for commands that pass every other check
    pub enable_strict_mode: bool,

    /// Patterns that mark a command unsafe, checked in order
    pub blacklist_patterns: Vec<String>,

    /// Patterns a command must match in strict mode
    pub whitelist_patterns: Vec<String>,

    /// Lower-case executable names that need severity-based handling
    pub dangerous_commands: BTreeSet<String>,

    /// Longest accepted command, in characters
    pub max_command_length: usize,

    pub security_policy: SecurityPolicy,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_command_security: true,
            enable_strict_mode: false,
            blacklist_patterns: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            whitelist_patterns: DEFAULT_WHITELIST.iter().map(|s| s.to_string()).collect(),
            dangerous_commands: severity::known_dangerous_commands()
                .map(str::to_string)
                .collect(),
            max_command_length: 1000,
            security_policy: SecurityPolicy::default(),
        }
    }
}

impl SecurityConfig {
    /// Check if `name` is a configured dangerous command (case-insensitive)
    pub fn is_dangerous(&self, name: &str) -> bool {
        self.dangerous_commands.contains(&name.to_lowercase())
    }
}

/// Default blacklist. Patterns containing `*` are wildcards matched against
/// the whole command; the rest must appear as whole words.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "rm -rf /",
    "rm -fr /",
    "rm -rf --no-preserve-root /",
    "rm -rf ~",
    "mkfs*",
    "dd if=* of=/dev/sd*",
    "dd if=* of=/dev/nvme*",
    "> /dev/sda",
    "chmod -R 777 /",
    "chown -R * /",
    "mv / /dev/null",
    "crontab -r",
    "history -c",
];

/// Default whitelist, only consulted in strict mode
pub const DEFAULT_WHITELIST: &[&str] = &[
    "ls*",
    "pwd",
    "whoami",
    "uptime",
    "date",
    "hostname",
    "cat *",
    "echo *",
    "grep *",
    "df*",
    "du *",
    "free*",
    "ps *",
    "uname*",
    "git status*",
    "git log*",
    "git diff*",
];

/// Errors from persisting the configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
