//! The on-disk configuration document
//!
//! JSON with `//` line comments and `/* */` block comments. Comments are
//! stripped before parsing and regenerated on every save; user comments are
//! not preserved.

use serde_json::{Map, Value};
use thiserror::Error;

use super::SecurityConfig;

/// Name of the single top-level section
pub const SECTION: &str = "commandSecurity";

/// Reasons a stored document cannot be used as-is
#[derive(Debug, Error)]
pub enum DocumentFault {
    #[error("document is empty")]
    Empty,

    #[error("document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("document has no \"commandSecurity\" object")]
    MissingSection,
}

/// Remove `//` and `/* */` comments outside string literals, then drop the
/// lines left blank.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Keep the newline so line structure survives
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip comments, parse, and return the `commandSecurity` object
pub fn parse_section(text: &str) -> Result<Map<String, Value>, DocumentFault> {
    let stripped = strip_comments(text);
    if stripped.trim().is_empty() {
        return Err(DocumentFault::Empty);
    }

    let value: Value = serde_json::from_str(&stripped)?;
    match value {
        Value::Object(mut root) => match root.remove(SECTION) {
            Some(Value::Object(section)) => Ok(section),
            _ => Err(DocumentFault::MissingSection),
        },
        _ => Err(DocumentFault::MissingSection),
    }
}

/// Render a config as a fresh, commented document
pub fn render(config: &SecurityConfig) -> Result<String, serde_json::Error> {
    let policy = &config.security_policy;
    let dangerous: Vec<&String> = config.dangerous_commands.iter().collect();

    let mut doc = String::new();
    doc.push_str("// shell-sentinel command security configuration\n");
    doc.push_str("/*\n");
    doc.push_str(" * Each field is validated on its own. A field with the wrong type or an\n");
    doc.push_str(" * out-of-range value falls back to its built-in default.\n");
    doc.push_str(" * This file is rewritten on save; comments you add are not kept.\n");
    doc.push_str(" */\n");
    doc.push_str("{\n");
    doc.push_str(&format!("  \"{}\": {{\n", SECTION));

    doc.push_str("    // Master switch. When false every command is allowed.\n");
    doc.push_str(&field("enableCommandSecurity", &config.enable_command_security)?);
    doc.push_str("    // Only allow commands that match a whitelist pattern.\n");
    doc.push_str(&field("enableStrictMode", &config.enable_strict_mode)?);
    doc.push_str("    // Longest accepted command in characters (1-10000).\n");
    doc.push_str(&field("maxCommandLength", &config.max_command_length)?);
    doc.push_str("    // Checked in order against every sub-command; the first match wins.\n");
    doc.push_str("    // \"*\" matches anything and the pattern must cover the whole command.\n");
    doc.push_str("    // Other patterns must appear as whole words.\n");
    doc.push_str(&list("blacklistPatterns", &config.blacklist_patterns)?);
    doc.push_str("    // In strict mode a command must match at least one of these.\n");
    doc.push_str(&list("whitelistPatterns", &config.whitelist_patterns)?);
    doc.push_str("    // Executables that need confirmation or are blocked by severity.\n");
    doc.push_str(&list("dangerousCommands", &dangerous)?);

    doc.push_str("    \"securityPolicy\": {\n");
    doc.push_str("      /* Critical dangerous commands always ask for confirmation. */\n");
    doc.push_str(&format!(
        "      \"blockCritical\": {},\n",
        serde_json::to_string(&policy.block_critical)?
    ));
    doc.push_str("      // Ask instead of block for medium-severity commands.\n");
    doc.push_str(&format!(
        "      \"askForMedium\": {},\n",
        serde_json::to_string(&policy.ask_for_medium)?
    ));
    doc.push_str("      // Ask instead of block for high-severity commands.\n");
    doc.push_str(&format!(
        "      \"askForHigh\": {},\n",
        serde_json::to_string(&policy.ask_for_high)?
    ));
    doc.push_str("      // Ask instead of block when a blacklist pattern matches.\n");
    doc.push_str(&format!(
        "      \"askForBlacklist\": {}\n",
        serde_json::to_string(&policy.ask_for_blacklist)?
    ));
    doc.push_str("    }\n");

    doc.push_str("  }\n");
    doc.push_str("}\n");
    Ok(doc)
}

fn field<T: serde::Serialize>(name: &str, value: &T) -> Result<String, serde_json::Error> {
    Ok(format!("    \"{}\": {},\n", name, serde_json::to_string(value)?))
}

fn list<T: serde::Serialize>(name: &str, items: &[T]) -> Result<String, serde_json::Error> {
    if items.is_empty() {
        return Ok(format!("    \"{}\": [],\n", name));
    }

    let mut out = format!("    \"{}\": [\n", name);
    for (i, item) in items.iter().enumerate() {
        let sep = if i + 1 < items.len() { "," } else { "" };
        out.push_str(&format!("      {}{}\n", serde_json::to_string(item)?, sep));
    }
    out.push_str("    ],\n");
    Ok(out)
}
