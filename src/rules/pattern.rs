//! Blacklist/whitelist pattern matching
//!
//! Two dialects, chosen by whether the pattern contains `*`:
//!
//! - **Wildcard**: each `*` becomes `.*` and the result is matched against the
//!   whole text. Other regex metacharacters are NOT escaped, so `.`, `+` or
//!   `|` in a wildcard pattern keep their regex meaning.
//! - **Literal**: the pattern is escaped and must appear as a whole phrase,
//!   bounded by whitespace or the ends of the text. Patterns ending in
//!   `" /"` (root-directory patterns) are only anchored at the start, so
//!   `rm -rf /` catches `rm -rf /` but not `rm -rf /home`.
//!
//! Matching is always case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing space + slash, optionally followed by one whitespace character
static ROOT_DIRECTORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s/\s?$").unwrap());

/// Which matching rules a pattern follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Wildcard,
    Literal,
    RootDirectory,
}

impl Dialect {
    /// Determine the dialect of a configured pattern
    pub fn of(pattern: &str) -> Self {
        if pattern.contains('*') {
            Dialect::Wildcard
        } else if ROOT_DIRECTORY.is_match(pattern) {
            Dialect::RootDirectory
        } else {
            Dialect::Literal
        }
    }
}

/// A configured pattern compiled for repeated matching
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a pattern.
    ///
    /// Returns `None` for a blank pattern, or when a wildcard pattern is not
    /// a valid regex once its `*`s are expanded. Such a pattern never matches
    /// anything.
    pub fn compile(pattern: &str) -> Option<Self> {
        if pattern.trim().is_empty() {
            tracing::warn!(pattern, "ignoring blank command pattern");
            return None;
        }

        let dialect = Dialect::of(pattern);
        let body = match dialect {
            Dialect::Wildcard => format!("^{}$", pattern.replace('*', ".*")),
            Dialect::RootDirectory => format!(r"^{}(?:\s|$)", regex::escape(pattern)),
            Dialect::Literal => format!(r"(?:^|\s){}(?:\s|$)", regex::escape(pattern)),
        };

        match Regex::new(&format!("(?i){}", body)) {
            Ok(regex) => Some(Self {
                source: pattern.to_string(),
                regex,
            }),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "ignoring invalid command pattern");
                None
            }
        }
    }

    /// Compile every pattern in a list, keeping order and skipping invalid ones
    pub fn compile_all(patterns: &[String]) -> Vec<Self> {
        patterns.iter().filter_map(|p| Self::compile(p)).collect()
    }

    /// Check if the text matches this pattern
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as it was configured
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Check if `text` matches a single configured pattern
pub fn matches(text: &str, pattern: &str) -> bool {
    CompiledPattern::compile(pattern).is_some_and(|p| p.is_match(text))
}
