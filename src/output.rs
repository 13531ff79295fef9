//! Security decisions and hook responses
//!
//! [`SecurityDecision`] is what the policy engine returns. [`HookOutput`] is
//! the JSON the binary writes back to a Claude Code PreToolUse hook.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::messages::{MessageTemplates, ReasonKey};
use crate::rules::Severity;

/// What the caller should do with the command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Block,
    Ask,
    Allow,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Block => "block",
            Action::Ask => "ask",
            Action::Allow => "allow",
        }
    }
}

/// Which kind of check produced the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blacklist,
    Whitelist,
    Dangerous,
    Permission,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Blacklist => "blacklist",
            Category::Whitelist => "whitelist",
            Category::Dangerous => "dangerous",
            Category::Permission => "permission",
        }
    }
}

/// A message template key plus the parameters to fill it with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub key: ReasonKey,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Reason {
    pub fn new(key: ReasonKey) -> Self {
        Self {
            key,
            params: BTreeMap::new(),
        }
    }

    /// Add a named parameter
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Render through a message catalog
    pub fn render(&self, templates: &dyn MessageTemplates) -> String {
        templates.render(self.key, &self.params)
    }
}

/// Result of evaluating one command.
///
/// `is_allowed` and `requires_approval` are derived from `action` when the
/// decision is built and cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDecision {
    is_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<Reason>,
    category: Category,
    severity: Severity,
    action: Action,
    requires_approval: bool,
}

impl SecurityDecision {
    /// Build a decision from its action
    pub fn new(action: Action, category: Category, severity: Severity, reason: Option<Reason>) -> Self {
        Self {
            is_allowed: action != Action::Block,
            reason,
            category,
            severity,
            action,
            requires_approval: action == Action::Ask,
        }
    }

    /// Unconditionally allowed
    pub fn allow() -> Self {
        Self::new(Action::Allow, Category::Permission, Severity::Low, None)
    }

    /// Blocked outright
    pub fn block(category: Category, severity: Severity, reason: Reason) -> Self {
        Self::new(Action::Block, category, severity, Some(reason))
    }

    /// Allowed only after the user confirms
    pub fn ask(category: Category, severity: Severity, reason: Reason) -> Self {
        Self::new(Action::Ask, category, severity, Some(reason))
    }

    pub fn is_allowed(&self) -> bool {
        self.is_allowed
    }

    pub fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn reason(&self) -> Option<&Reason> {
        self.reason.as_ref()
    }

    /// Check if the command may run without asking anyone
    pub fn is_allow(&self) -> bool {
        self.action == Action::Allow
    }

    /// Check if the command must not run
    pub fn is_block(&self) -> bool {
        self.action == Action::Block
    }

    /// Check if the user must confirm the command
    pub fn is_ask(&self) -> bool {
        self.action == Action::Ask
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Main output structure for Claude Code hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    /// Hook-specific output containing the permission decision
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Optional system message to show the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    /// The hook event name (typically "PreToolUse")
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// Permission decision: "ask" or "deny"
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    /// Rendered reason shown to the model and the user
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// Create an allow response (empty output = allow)
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    fn with_decision(decision: &str, label: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: decision.to_string(),
                permission_decision_reason: reason.to_string(),
            }),
            system_message: Some(format!("[shell-sentinel] {}: {}", label, reason)),
        }
    }

    /// Create a deny response with reason
    pub fn deny(reason: &str) -> Self {
        Self::with_decision("deny", "Blocked", reason)
    }

    /// Create a response that hands the decision to the user
    pub fn ask(reason: &str) -> Self {
        Self::with_decision("ask", "Confirmation required", reason)
    }

    /// Create output from a decision, rendering its reason
    pub fn from_decision(decision: &SecurityDecision, templates: &dyn MessageTemplates) -> Self {
        let reason = decision
            .reason()
            .map(|r| r.render(templates))
            .unwrap_or_else(|| format!("{} command", decision.category().as_str()));

        match decision.action() {
            Action::Allow => HookOutput::allow(),
            Action::Ask => HookOutput::ask(&reason),
            Action::Block => HookOutput::deny(&reason),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
