//! Human-readable reason templates
//!
//! Decisions carry a [`ReasonKey`] and named parameters rather than prose.
//! The host renders them through a [`MessageTemplates`] implementation, which
//! is where localization lives. [`EnglishMessages`] is the built-in catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Template key naming which policy stage produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonKey {
    /// Params: `limit`
    CommandTooLong,
    /// Params: `command`, `pattern`
    BlacklistMatch,
    /// Params: `command`
    DangerousOperation,
    /// Params: `command`
    NotWhitelisted,
}

impl ReasonKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonKey::CommandTooLong => "command-too-long",
            ReasonKey::BlacklistMatch => "blacklist-match",
            ReasonKey::DangerousOperation => "dangerous-operation",
            ReasonKey::NotWhitelisted => "not-whitelisted",
        }
    }
}

impl fmt::Display for ReasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a reason template into text
pub trait MessageTemplates {
    fn render(&self, key: ReasonKey, params: &BTreeMap<String, String>) -> String;
}

/// Default English catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl EnglishMessages {
    fn template(key: ReasonKey) -> &'static str {
        match key {
            ReasonKey::CommandTooLong => "Command exceeds the maximum length of {limit} characters",
            ReasonKey::BlacklistMatch => "Command `{command}` matches blocked pattern `{pattern}`",
            ReasonKey::DangerousOperation => "`{command}` is a potentially dangerous operation",
            ReasonKey::NotWhitelisted => "`{command}` is not on the allowed command list",
        }
    }
}

impl MessageTemplates for EnglishMessages {
    fn render(&self, key: ReasonKey, params: &BTreeMap<String, String>) -> String {
        fill(Self::template(key), params)
    }
}

/// Substitute `{name}` placeholders in one pass over the template.
///
/// Unknown placeholders are left as-is. Substituted values are never
/// rescanned, so a value containing `{name}` is copied literally.
pub fn fill(template: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}
