//! Field-level merge of user-supplied settings
//!
//! A user document is never adopted wholesale. Each known field is checked
//! on its own; a field with the wrong type or an out-of-range value keeps
//! the base value and the rest of the document still applies.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::{SecurityConfig, SecurityPolicy, MAX_COMMAND_LENGTH_LIMIT};

/// Merge a `commandSecurity` object onto `base`.
///
/// Missing fields keep the base value. Unknown fields are ignored.
pub fn merge_section(base: &SecurityConfig, section: &Map<String, Value>) -> SecurityConfig {
    let mut config = base.clone();

    if let Some(value) = section.get("enableCommandSecurity") {
        merge_bool(&mut config.enable_command_security, "enableCommandSecurity", value);
    }
    if let Some(value) = section.get("enableStrictMode") {
        merge_bool(&mut config.enable_strict_mode, "enableStrictMode", value);
    }
    if let Some(value) = section.get("maxCommandLength") {
        match command_length(value) {
            Some(length) => config.max_command_length = length,
            None => reject("maxCommandLength", value),
        }
    }
    if let Some(value) = section.get("blacklistPatterns") {
        match pattern_list(value) {
            Some(patterns) => config.blacklist_patterns = patterns,
            None => reject("blacklistPatterns", value),
        }
    }
    if let Some(value) = section.get("whitelistPatterns") {
        match pattern_list(value) {
            Some(patterns) => config.whitelist_patterns = patterns,
            None => reject("whitelistPatterns", value),
        }
    }
    if let Some(value) = section.get("dangerousCommands") {
        match command_set(value) {
            Some(commands) => config.dangerous_commands = commands,
            None => reject("dangerousCommands", value),
        }
    }
    if let Some(value) = section.get("securityPolicy") {
        match value.as_object() {
            Some(policy) => merge_policy(&mut config.security_policy, policy),
            None => reject("securityPolicy", value),
        }
    }

    config
}

fn merge_policy(policy: &mut SecurityPolicy, section: &Map<String, Value>) {
    let fields: [(&str, &mut bool); 4] = [
        ("blockCritical", &mut policy.block_critical),
        ("askForMedium", &mut policy.ask_for_medium),
        ("askForHigh", &mut policy.ask_for_high),
        ("askForBlacklist", &mut policy.ask_for_blacklist),
    ];
    for (name, target) in fields {
        if let Some(value) = section.get(name) {
            merge_bool(target, name, value);
        }
    }
}

fn merge_bool(target: &mut bool, name: &str, value: &Value) {
    match value.as_bool() {
        Some(b) => *target = b,
        None => reject(name, value),
    }
}

fn reject(name: &str, value: &Value) {
    tracing::warn!(field = name, value = %value, "invalid configuration field, keeping previous value");
}

/// A whole number in (0, 10000]
fn command_length(value: &Value) -> Option<usize> {
    let n = value.as_f64()?;
    if n.fract() != 0.0 || n <= 0.0 || n > MAX_COMMAND_LENGTH_LIMIT as f64 {
        return None;
    }
    Some(n as usize)
}

/// Array of strings. Non-string entries are dropped; blank strings are kept
/// and never match.
fn pattern_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Array of executable names, trimmed and lower-cased
fn command_set(value: &Value) -> Option<BTreeSet<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}
