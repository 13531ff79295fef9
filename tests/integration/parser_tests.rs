//! Integration tests for command line parsing

use shell_sentinel::{parse, Command};

fn simple(exe: &str, args: &[&str]) -> Command {
    Command::simple(exe, args.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_quoted_and_operator_is_single_argument() {
    assert_eq!(parse(r#"echo "a && b""#), simple("echo", &["a && b"]));
}

#[test]
fn test_mixed_separators_stay_flat() {
    let parsed = parse("make && make test || echo failed; make clean");
    match &parsed {
        Command::Compound { parts } => {
            assert_eq!(parts.len(), 4);
            assert!(parts.iter().all(|p| !p.is_compound()));
        }
        other => panic!("expected compound, got {:?}", other),
    }
    assert_eq!(parsed.executable(), "make");
}

#[test]
fn test_quoted_parts_inside_compound() {
    assert_eq!(
        parse(r#"git commit -m "a; b" && git push"#),
        Command::Compound {
            parts: vec![
                simple("git", &["commit", "-m", "a; b"]),
                simple("git", &["push"]),
            ],
        }
    );
}

#[test]
fn test_adjacent_quotes_join_token() {
    assert_eq!(parse(r#"echo "a"'b'c"#), simple("echo", &["abc"]));
}

#[test]
fn test_empty_quotes_produce_no_token() {
    assert_eq!(parse(r#"echo """#), simple("echo", &[]));
}

#[test]
fn test_parse_never_panics_on_odd_input() {
    for input in ["\"", "'", "\\", "&&", "||", ";", "&", "|", "\\\"", "a\\", "'\"'\"", "\u{0}"] {
        let _ = parse(input);
    }
}
