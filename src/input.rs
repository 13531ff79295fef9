//! Input parsing for Claude Code hook JSON format
//!
//! Parses the PreToolUse JSON the binary receives on stdin. Only shell
//! commands are gated; every other tool is passed through untouched.

use serde::Deserialize;

/// Main input structure from Claude Code hooks
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash")
    pub tool_name: String,

    /// Tool-specific input parameters
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Tool-specific input variants
#[derive(Debug, Clone)]
pub enum ToolInput {
    /// Shell command execution
    Shell { command: String },

    /// Anything without a `command` string
    Other { raw: serde_json::Value },
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(command) = value.get("command").and_then(|v| v.as_str()) {
            return Ok(ToolInput::Shell {
                command: command.to_string(),
            });
        }

        Ok(ToolInput::Other { raw: value })
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The command to gate, if this is a shell tool call
    pub fn command(&self) -> Option<&str> {
        match (&self.tool_input, self.tool_name.as_str()) {
            (ToolInput::Shell { command }, "Bash" | "bash" | "Shell" | "shell") => {
                Some(command.as_str())
            }
            _ => None,
        }
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match &self.tool_input {
            ToolInput::Shell { command } => summarize(command),
            ToolInput::Other { .. } => format!("{} (not gated)", self.tool_name),
        }
    }
}

/// Truncate a command for log lines, on a char boundary
pub fn summarize(command: &str) -> String {
    const LIMIT: usize = 100;
    if command.chars().count() > LIMIT {
        let truncated: String = command.chars().take(LIMIT).collect();
        format!("{}...", truncated)
    } else {
        command.to_string()
    }
}
