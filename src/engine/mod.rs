//! Security policy engine for shell-sentinel
//!
//! Runs a command through a fixed chain of stages. The first stage that
//! produces a non-allow outcome decides:
//!
//! 1. security disabled → allow
//! 2. too long → block
//! 3. blacklist pattern in any sub-command → block or ask
//! 4. dangerous executable in any sub-command → ask or block by severity
//! 5. strict mode without a whitelist match → block
//! 6. otherwise → allow
//!
//! Evaluation is total: every input yields a decision.

pub mod bash;

use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::messages::ReasonKey;
use crate::output::{Category, Reason, SecurityDecision};
use crate::parser;
use crate::rules::pattern::CompiledPattern;
use crate::rules::Severity;

/// A config snapshot with its patterns compiled
#[derive(Debug, Clone)]
pub struct SecurityEngine {
    config: Arc<SecurityConfig>,
    blacklist: Vec<CompiledPattern>,
    whitelist: Vec<CompiledPattern>,
}

impl SecurityEngine {
    /// Create an engine for a config snapshot
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let blacklist = CompiledPattern::compile_all(&config.blacklist_patterns);
        let whitelist = CompiledPattern::compile_all(&config.whitelist_patterns);
        Self {
            config,
            blacklist,
            whitelist,
        }
    }

    /// Main entry point: evaluate a command line and return a decision
    pub fn evaluate(&self, command: &str) -> SecurityDecision {
        let config = &self.config;
        if !config.enable_command_security {
            return SecurityDecision::allow();
        }

        let text = command.trim();
        if text.chars().count() > config.max_command_length {
            let reason = Reason::new(ReasonKey::CommandTooLong)
                .with("limit", config.max_command_length.to_string());
            return self.report(
                command,
                SecurityDecision::block(Category::Permission, Severity::Medium, reason),
            );
        }

        let parsed = parser::parse(text);
        let policy = &config.security_policy;

        if let Some(decision) = bash::check_blacklist(&parsed, &self.blacklist, policy) {
            return self.report(command, decision);
        }

        if let Some(decision) = bash::check_dangerous(&parsed, config) {
            return self.report(command, decision);
        }

        if config.enable_strict_mode {
            if let Some(decision) = bash::check_whitelist(text, &self.whitelist) {
                return self.report(command, decision);
            }
        }

        SecurityDecision::allow()
    }

    fn report(&self, command: &str, decision: SecurityDecision) -> SecurityDecision {
        tracing::debug!(
            command,
            action = decision.action().as_str(),
            category = decision.category().as_str(),
            severity = %decision.severity(),
            "command not allowed outright"
        );
        decision
    }

    /// Get the configuration
    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }
}

/// Evaluate one command against a config
pub fn evaluate(command: &str, config: &SecurityConfig) -> SecurityDecision {
    SecurityEngine::new(Arc::new(config.clone())).evaluate(command)
}
