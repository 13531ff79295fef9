//! Security rules for shell-sentinel
//!
//! Pattern matching for the configured blacklist/whitelist and the fixed
//! severity tiers for dangerous executables.

pub mod pattern;
pub mod severity;

pub use pattern::{matches, CompiledPattern};
pub use severity::{classify, Severity};
