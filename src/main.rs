//! shell-sentinel - Security gate for shell commands proposed by AI agents
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook (reads JSON from stdin, writes JSON to stdout)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | shell-sentinel
//!
//! # Evaluate a single command and print the decision
//! shell-sentinel --check "ls && rm -rf /"
//!
//! # Rewrite the configuration document with the defaults
//! shell-sentinel --init-config
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use shell_sentinel::{
    audit::{AuditLogger, AUDIT_FILE_NAME},
    config::ConfigStore,
    engine::SecurityEngine,
    input::HookInput,
    messages::EnglishMessages,
    output::HookOutput,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SHELL_SENTINEL_LOG";

/// Print version information
fn print_version() {
    println!("shell-sentinel {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"shell-sentinel - Security gate for shell commands proposed by AI agents

USAGE:
    shell-sentinel [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -d, --data-dir PATH     Directory holding command-security.json and audit.jsonl
        --check COMMAND     Evaluate one command and print the decision as JSON
        --init-config       Rewrite the configuration document with the defaults
        --print-config      Print the effective configuration as JSON
        --no-audit          Do not append to the audit log

ENVIRONMENT:
    {LOG_ENV}=debug   Diagnostics on stderr (default: warn)

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash",
          "hooks": [{{ "type": "command", "command": "shell-sentinel" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
#[derive(Default)]
struct Args {
    help: bool,
    version: bool,
    data_dir: Option<String>,
    check: Option<String>,
    init_config: bool,
    print_config: bool,
    no_audit: bool,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = env::args().collect();
        let mut result = Args::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "--init-config" => result.init_config = true,
                "--print-config" => result.print_config = true,
                "--no-audit" => result.no_audit = true,
                flag @ ("-d" | "--data-dir") => {
                    i += 1;
                    let value = args.get(i).ok_or_else(|| missing_value(flag))?;
                    result.data_dir = Some(value.clone());
                }
                "--check" => {
                    i += 1;
                    let value = args.get(i).ok_or_else(|| missing_value("--check"))?;
                    result.check = Some(value.clone());
                }
                arg if arg.starts_with("--data-dir=") => {
                    result.data_dir = Some(arg.trim_start_matches("--data-dir=").to_string());
                }
                arg if arg.starts_with("--check=") => {
                    result.check = Some(arg.trim_start_matches("--check=").to_string());
                }
                other => eprintln!("Warning: ignoring unknown argument {}", other),
            }
            i += 1;
        }

        Ok(result)
    }

    /// Resolve the data directory
    fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shell-sentinel"),
        }
    }
}

fn missing_value(flag: &str) -> String {
    format!("{} requires a value", flag)
}

/// Read the whole hook payload. A failed read or invalid UTF-8 is an error.
fn read_stdin() -> Result<String, String> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read hook input: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("hook input is not valid UTF-8: {}", e))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries the hook response, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn emit(json: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", json).and_then(|_| handle.flush()) {
        tracing::error!(error = %e, "failed to write response");
    }
}

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'shell-sentinel --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging();

    let data_dir = args.data_dir();
    let store = ConfigStore::new(&data_dir);

    if args.init_config {
        return match store.regenerate_defaults() {
            Ok(()) => {
                println!("Wrote {}", store.path().display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    // A config that cannot be persisted still leaves usable defaults in memory
    if let Err(e) = store.reload() {
        tracing::warn!(error = %e, "using in-memory defaults");
    }
    let config = store.snapshot();

    if args.print_config {
        match serde_json::to_string_pretty(config.as_ref()) {
            Ok(json) => emit(&json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let engine = SecurityEngine::new(Arc::clone(&config));
    let disabled = !config.enable_command_security;

    let mut logger = if args.no_audit {
        AuditLogger::default()
    } else {
        AuditLogger::new(Some(&data_dir.join(AUDIT_FILE_NAME)))
    };

    if let Some(command) = args.check {
        let decision = engine.evaluate(&command);
        if let Err(e) = logger.log_decision(&command, &decision, None, disabled) {
            tracing::warn!(error = %e, "failed to write audit log");
        }
        emit(&decision.to_json());
        return ExitCode::SUCCESS;
    }

    // Unreadable input could be an evasion attempt: fail closed
    let input_json = match read_stdin() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "rejecting hook input");
            emit(&HookOutput::deny(&e).to_json());
            return ExitCode::SUCCESS;
        }
    };

    // Handle empty input
    if input_json.trim().is_empty() {
        emit(&HookOutput::allow().to_json());
        return ExitCode::SUCCESS;
    }

    let input = match HookInput::from_json(&input_json) {
        Ok(input) => input,
        Err(e) => {
            // Malformed input could be an evasion attempt: fail closed
            tracing::error!(error = %e, "failed to parse hook input");
            let output = HookOutput::deny(&format!("Failed to parse hook input: {}", e));
            emit(&output.to_json());
            return ExitCode::SUCCESS;
        }
    };

    let Some(command) = input.command() else {
        tracing::debug!(tool = %input.summary(), "passing through");
        emit(&HookOutput::allow().to_json());
        return ExitCode::SUCCESS;
    };

    let decision = engine.evaluate(command);

    if let Err(e) = logger.log_decision(command, &decision, input.session_id.as_deref(), disabled) {
        tracing::warn!(error = %e, "failed to write audit log");
    }

    emit(&HookOutput::from_decision(&decision, &EnglishMessages).to_json());
    ExitCode::SUCCESS
}
