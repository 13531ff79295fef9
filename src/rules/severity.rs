//! Severity classification for dangerous executables
//!
//! Only the bare executable name is inspected. Arguments and paths are never
//! scanned, so `/tmp/rm-backups` or `cat reboot.log` do not trip a severity.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How dangerous a command is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data destruction, power state, disks and filesystems. `drop`, `delete`
/// and `truncate` cover SQL statements typed where a shell command was
/// expected; they only apply when they are the first word of the line.
pub const CRITICAL_COMMANDS: &[&str] = &[
    "rm", "rmdir", "del", "delete", "format", "shutdown", "reboot", "halt", "poweroff", "dd",
    "shred", "wipefs", "mkfs", "fdisk", "parted", "drop", "truncate",
];

/// Process control, services, ownership and permissions, mounts
pub const HIGH_COMMANDS: &[&str] = &[
    "killall", "pkill", "kill", "systemctl", "service", "chmod", "chown", "chgrp", "mount",
    "umount",
];

/// Firewalls and privilege escalation
pub const MEDIUM_COMMANDS: &[&str] = &[
    "iptables",
    "ip6tables",
    "ufw",
    "firewall-cmd",
    "nft",
    "sudo",
    "su",
    "doas",
];

static CRITICAL: Lazy<HashSet<&'static str>> = Lazy::new(|| CRITICAL_COMMANDS.iter().copied().collect());
static HIGH: Lazy<HashSet<&'static str>> = Lazy::new(|| HIGH_COMMANDS.iter().copied().collect());
static MEDIUM: Lazy<HashSet<&'static str>> = Lazy::new(|| MEDIUM_COMMANDS.iter().copied().collect());

/// Classify an executable name. Exact, case-insensitive; unknown names are low.
pub fn classify(executable: &str) -> Severity {
    let name = executable.to_lowercase();
    let name = name.as_str();

    if CRITICAL.contains(name) {
        Severity::Critical
    } else if HIGH.contains(name) {
        Severity::High
    } else if MEDIUM.contains(name) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Every executable the classifier knows about, in tier order
pub fn known_dangerous_commands() -> impl Iterator<Item = &'static str> {
    CRITICAL_COMMANDS
        .iter()
        .chain(HIGH_COMMANDS)
        .chain(MEDIUM_COMMANDS)
        .copied()
}
