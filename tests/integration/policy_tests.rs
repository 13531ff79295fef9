//! Integration tests for command policy evaluation

use shell_sentinel::{evaluate, Action, Category, ReasonKey, SecurityConfig, SecurityPolicy, Severity};

fn defaults() -> SecurityConfig {
    SecurityConfig::default()
}

fn action(command: &str) -> Action {
    evaluate(command, &defaults()).action()
}

// ============================================================================
// Disabled and Length Checks
// ============================================================================

#[test]
fn test_disabled_allows_everything() {
    let config = SecurityConfig {
        enable_command_security: false,
        enable_strict_mode: true,
        ..defaults()
    };
    for command in ["rm -rf /", "mkfs.ext4 /dev/sda", "sudo su", "curl x", ""] {
        let decision = evaluate(command, &config);
        assert!(decision.is_allowed(), "{}", command);
        assert_eq!(decision.action(), Action::Allow, "{}", command);
    }
}

#[test]
fn test_too_long_is_permission_block() {
    let config = SecurityConfig {
        max_command_length: 20,
        ..defaults()
    };
    let decision = evaluate(&format!("echo {}", "a".repeat(30)), &config);
    assert!(!decision.is_allowed());
    assert_eq!(decision.category(), Category::Permission);
    assert_eq!(decision.severity(), Severity::Medium);
    assert_eq!(decision.action(), Action::Block);
    assert_eq!(decision.reason().unwrap().key, ReasonKey::CommandTooLong);
}

#[test]
fn test_length_check_precedes_blacklist() {
    let config = SecurityConfig {
        max_command_length: 3,
        ..defaults()
    };
    let decision = evaluate("rm -rf /", &config);
    assert_eq!(decision.category(), Category::Permission);
}

// ============================================================================
// Blacklist
// ============================================================================

#[test]
fn test_rm_rf_root_blocked() {
    assert_eq!(action("rm -rf /"), Action::Block);
    assert_eq!(action("rm -rf / "), Action::Block);
    assert_eq!(action("RM -RF /"), Action::Block);
}

#[test]
fn test_rm_rf_subdirectory_only_asks() {
    // Not the root pattern; falls through to the dangerous-command stage
    let decision = evaluate("rm -rf /home/user/tmp", &defaults());
    assert_eq!(decision.category(), Category::Dangerous);
    assert_eq!(decision.action(), Action::Ask);
}

#[test]
fn test_compound_checks_every_part() {
    let decision = evaluate("ls && rm -rf /", &defaults());
    assert!(!decision.is_allowed());
    assert_eq!(decision.category(), Category::Blacklist);

    assert_eq!(action("cd /tmp; echo ok || rm -rf /"), Action::Block);
}

#[test]
fn test_quoted_operator_is_one_command() {
    assert_eq!(action(r#"echo "rm -rf / && x""#), Action::Allow);
}

#[test]
fn test_disk_patterns_blocked() {
    assert_eq!(action("mkfs.ext4 /dev/sdb1"), Action::Block);
    assert_eq!(action("dd if=/dev/zero of=/dev/sda bs=1M"), Action::Block);
    assert_eq!(action("echo junk > /dev/sda"), Action::Block);
}

#[test]
fn test_blacklist_severity_always_high() {
    let decision = evaluate("mkfs.ext4 /dev/sdb1", &defaults());
    assert_eq!(decision.severity(), Severity::High);
}

#[test]
fn test_blacklist_ask_policy() {
    let config = SecurityConfig {
        security_policy: SecurityPolicy {
            ask_for_blacklist: true,
            ..SecurityPolicy::default()
        },
        ..defaults()
    };
    let decision = evaluate("rm -rf /", &config);
    assert_eq!(decision.action(), Action::Ask);
    assert!(decision.is_allowed());
    assert!(decision.requires_approval());
}

#[test]
fn test_blacklist_beats_dangerous() {
    // Both stages would fire on `rm -rf /`; the blacklist stage runs first
    let decision = evaluate("rm -rf /", &defaults());
    assert_eq!(decision.category(), Category::Blacklist);
}

#[test]
fn test_blacklist_in_later_part_beats_dangerous_in_earlier_part() {
    let decision = evaluate("sudo ls; rm -rf /", &defaults());
    assert_eq!(decision.category(), Category::Blacklist);
}

// ============================================================================
// Dangerous Commands
// ============================================================================

#[test]
fn test_critical_always_asks() {
    for block_critical in [true, false] {
        let config = SecurityConfig {
            security_policy: SecurityPolicy {
                block_critical,
                ask_for_high: false,
                ask_for_medium: false,
                ask_for_blacklist: false,
            },
            ..defaults()
        };
        let decision = evaluate("rm notes.txt", &config);
        assert_eq!(decision.action(), Action::Ask);
        assert_eq!(decision.severity(), Severity::Critical);
        assert!(decision.requires_approval());
    }
}

#[test]
fn test_high_follows_policy() {
    let asking = evaluate("chmod 600 key.pem", &defaults());
    assert_eq!(asking.action(), Action::Ask);
    assert_eq!(asking.severity(), Severity::High);

    let config = SecurityConfig {
        security_policy: SecurityPolicy {
            ask_for_high: false,
            ..SecurityPolicy::default()
        },
        ..defaults()
    };
    let blocking = evaluate("systemctl stop nginx", &config);
    assert_eq!(blocking.action(), Action::Block);
    assert!(!blocking.is_allowed());
}

#[test]
fn test_medium_follows_policy() {
    assert_eq!(action("sudo apt update"), Action::Ask);

    let config = SecurityConfig {
        security_policy: SecurityPolicy {
            ask_for_medium: false,
            ..SecurityPolicy::default()
        },
        ..defaults()
    };
    let decision = evaluate("ufw allow 22", &config);
    assert_eq!(decision.action(), Action::Block);
    assert_eq!(decision.severity(), Severity::Medium);
}

#[test]
fn test_unclassified_dangerous_command_asks() {
    let mut config = defaults();
    config.dangerous_commands.insert("curl".to_string());
    let decision = evaluate("curl https://example.com", &config);
    assert_eq!(decision.severity(), Severity::Low);
    assert_eq!(decision.action(), Action::Ask);
}

#[test]
fn test_removed_dangerous_command_allowed() {
    let mut config = defaults();
    config.dangerous_commands.clear();
    assert_eq!(evaluate("rm notes.txt", &config).action(), Action::Allow);
}

#[test]
fn test_dangerous_found_in_later_part() {
    let decision = evaluate("cd /srv && git pull && systemctl restart app", &defaults());
    assert_eq!(decision.category(), Category::Dangerous);
    assert_eq!(decision.reason().unwrap().params["command"], "systemctl");
}

#[test]
fn test_dangerous_name_in_arguments_ignored() {
    assert_eq!(action("cat /var/log/reboot.log"), Action::Allow);
    assert_eq!(action("grep rm notes.txt"), Action::Allow);
    assert_eq!(action("./rm"), Action::Allow);
}

#[test]
fn test_sql_keyword_as_first_word() {
    let decision = evaluate("DROP TABLE users", &defaults());
    assert_eq!(decision.severity(), Severity::Critical);
    assert_eq!(decision.action(), Action::Ask);

    assert_eq!(action("psql -c 'DROP TABLE users'"), Action::Allow);
}

// ============================================================================
// Strict Mode
// ============================================================================

fn strict() -> SecurityConfig {
    SecurityConfig {
        enable_strict_mode: true,
        ..defaults()
    }
}

#[test]
fn test_strict_mode_rejects_unlisted() {
    let decision = evaluate("curl https://example.com", &strict());
    assert_eq!(decision.action(), Action::Block);
    assert_eq!(decision.category(), Category::Whitelist);
    assert_eq!(decision.severity(), Severity::Medium);
    assert!(!decision.requires_approval());
    assert!(!decision.is_allowed());
}

#[test]
fn test_strict_mode_never_asks_even_with_lenient_policy() {
    let mut config = strict();
    config.security_policy = SecurityPolicy {
        block_critical: false,
        ask_for_medium: true,
        ask_for_high: true,
        ask_for_blacklist: true,
    };
    assert_eq!(evaluate("python3 app.py", &config).action(), Action::Block);
}

#[test]
fn test_strict_mode_allows_listed() {
    assert_eq!(evaluate("ls -la /var", &strict()).action(), Action::Allow);
    assert_eq!(evaluate("pwd", &strict()).action(), Action::Allow);
    assert_eq!(evaluate("GIT STATUS", &strict()).action(), Action::Allow);
}

#[test]
fn test_strict_mode_runs_after_dangerous() {
    let decision = evaluate("rm notes.txt", &strict());
    assert_eq!(decision.category(), Category::Dangerous);
    assert_eq!(decision.action(), Action::Ask);
}

#[test]
fn test_strict_mode_with_empty_whitelist_blocks_all() {
    let mut config = strict();
    config.whitelist_patterns.clear();
    assert_eq!(evaluate("ls", &config).action(), Action::Block);
}

// ============================================================================
// Decision Invariants
// ============================================================================

#[test]
fn test_decision_invariants_hold() {
    let configs = [
        defaults(),
        strict(),
        SecurityConfig {
            security_policy: SecurityPolicy {
                block_critical: true,
                ask_for_medium: false,
                ask_for_high: false,
                ask_for_blacklist: true,
            },
            ..defaults()
        },
    ];
    let commands = [
        "",
        "ls",
        "rm -rf /",
        "sudo reboot",
        "chmod 777 x && ls",
        "echo 'unterminated",
        "a && b || c ; d",
        "iptables -F",
        "\"\\\"",
    ];

    for config in &configs {
        for command in commands {
            let decision = evaluate(command, config);
            assert_eq!(decision.requires_approval(), decision.action() == Action::Ask);
            assert_eq!(decision.is_allowed(), decision.action() != Action::Block);
            assert_eq!(decision.reason().is_none(), decision.action() == Action::Allow);
        }
    }
}
