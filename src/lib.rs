//! shell-sentinel - Security gate for shell commands proposed by AI agents
//!
//! Decides, before anything runs, whether a command line is allowed, must be
//! confirmed by a human, or is blocked outright.
//!
//! # Features
//!
//! - **Compound-aware parsing**: `a && b; c` is split and every part is checked
//! - **Blacklist/whitelist patterns**: whole-word literals or `*` wildcards
//! - **Dangerous commands**: severity tiers decide between ask and block
//! - **Strict mode**: only whitelisted commands pass
//! - **Commented JSON config**: validated field by field, never adopted wholesale
//! - **Audit logging**: JSONL log of all decisions
//!
//! # Example
//!
//! ```
//! use shell_sentinel::{evaluate, Action, SecurityConfig};
//!
//! let config = SecurityConfig::default();
//!
//! let decision = evaluate("ls -la && rm -rf /", &config);
//! assert_eq!(decision.action(), Action::Block);
//!
//! let decision = evaluate("rm build.log", &config);
//! assert!(decision.requires_approval());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod input;
pub mod messages;
pub mod output;
pub mod parser;
pub mod rules;

// Re-exports for convenience
pub use config::{ConfigError, ConfigStore, SecurityConfig, SecurityPolicy};
pub use engine::{evaluate, SecurityEngine};
pub use input::HookInput;
pub use messages::{EnglishMessages, MessageTemplates, ReasonKey};
pub use output::{Action, Category, HookOutput, Reason, SecurityDecision};
pub use parser::{parse, Command};
pub use rules::{classify, matches, Severity};
