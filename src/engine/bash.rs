//! Per-stage checks over a parsed command tree
//!
//! Each check walks every simple command in pre-order and reports the first
//! hit anywhere in the tree. A clean first part never ends the walk, so
//! `ls && rm -rf /` is judged on both halves.

use crate::config::{SecurityConfig, SecurityPolicy};
use crate::messages::ReasonKey;
use crate::output::{Action, Category, Reason, SecurityDecision};
use crate::parser::command::{leaf_text, Command};
use crate::rules::pattern::CompiledPattern;
use crate::rules::severity::{self, Severity};

/// First blacklist hit across the tree.
///
/// Every leaf is tested against every pattern in order, using the
/// lower-cased `executable + " " + arguments`. Always high severity.
pub fn check_blacklist(
    command: &Command,
    blacklist: &[CompiledPattern],
    policy: &SecurityPolicy,
) -> Option<SecurityDecision> {
    command.find_leaf(&mut |executable, arguments| {
        let text = leaf_text(executable, arguments).to_lowercase();
        let pattern = blacklist.iter().find(|p| p.is_match(&text))?;

        let action = if policy.ask_for_blacklist {
            Action::Ask
        } else {
            Action::Block
        };
        let reason = Reason::new(ReasonKey::BlacklistMatch)
            .with("command", text.trim_end())
            .with("pattern", pattern.source());

        Some(SecurityDecision::new(
            action,
            Category::Blacklist,
            Severity::High,
            Some(reason),
        ))
    })
}

/// First leaf whose executable is a configured dangerous command
pub fn check_dangerous(command: &Command, config: &SecurityConfig) -> Option<SecurityDecision> {
    command.find_leaf(&mut |executable, _| {
        if !config.is_dangerous(executable) {
            return None;
        }

        let name = executable.to_lowercase();
        let severity = severity::classify(&name);
        let reason = Reason::new(ReasonKey::DangerousOperation).with("command", name);

        Some(SecurityDecision::new(
            dangerous_action(severity, &config.security_policy),
            Category::Dangerous,
            severity,
            Some(reason),
        ))
    })
}

/// Action for a dangerous command of the given severity.
///
/// Critical and low always ask; `block_critical` is not consulted here.
pub fn dangerous_action(severity: Severity, policy: &SecurityPolicy) -> Action {
    let ask = match severity {
        Severity::Critical | Severity::Low => true,
        Severity::High => policy.ask_for_high,
        Severity::Medium => policy.ask_for_medium,
    };
    if ask {
        Action::Ask
    } else {
        Action::Block
    }
}

/// Strict mode: the full command text must match some whitelist pattern.
/// A miss is always a block, never an ask.
pub fn check_whitelist(command_text: &str, whitelist: &[CompiledPattern]) -> Option<SecurityDecision> {
    if whitelist.iter().any(|p| p.is_match(command_text)) {
        return None;
    }

    Some(SecurityDecision::block(
        Category::Whitelist,
        Severity::Medium,
        Reason::new(ReasonKey::NotWhitelisted).with("command", command_text),
    ))
}
