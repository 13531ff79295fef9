//! Command line tokenization
//!
//! A deliberately small quote-aware scanner. It splits compound commands on
//! unquoted `&&`, `||` and `;` and breaks each part into words. Pipes,
//! redirections, substitutions and variables are ordinary word characters.
//!
//! Quoting rule: a `'` or `"` toggles its quote state unless the character
//! before it is a backslash. No other escaping is interpreted.

use super::command::Command;

/// Tracks which quote, if any, the scanner is inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum QuoteState {
    #[default]
    None,
    Single,
    Double,
}

impl QuoteState {
    fn is_quoted(self) -> bool {
        self != QuoteState::None
    }

    /// Apply the character at `i`. Returns `true` if it toggled the state.
    fn step(&mut self, chars: &[char], i: usize) -> bool {
        let escaped = i > 0 && chars[i - 1] == '\\';
        if escaped {
            return false;
        }
        match (chars[i], *self) {
            ('\'', QuoteState::None) => *self = QuoteState::Single,
            ('\'', QuoteState::Single) => *self = QuoteState::None,
            ('"', QuoteState::None) => *self = QuoteState::Double,
            ('"', QuoteState::Double) => *self = QuoteState::None,
            _ => return false,
        }
        true
    }
}

/// Length of the compound separator starting at `i`, if any
fn separator_len(chars: &[char], i: usize) -> Option<usize> {
    match chars[i] {
        ';' => Some(1),
        '&' | '|' if chars.get(i + 1) == Some(&chars[i]) => Some(2),
        _ => None,
    }
}

/// Parse a raw command line into a [`Command`].
///
/// Never fails: empty input yields a simple command with an empty executable
/// and unterminated quotes simply run to the end of the input.
pub fn parse(command: &str) -> Command {
    let chars: Vec<char> = command.trim().chars().collect();

    if has_compound_separator(&chars) {
        Command::Compound {
            parts: split_compound(&chars),
        }
    } else {
        tokenize_simple(&chars)
    }
}

fn has_compound_separator(chars: &[char]) -> bool {
    let mut quote = QuoteState::default();
    (0..chars.len()).any(|i| {
        quote.step(chars, i);
        !quote.is_quoted() && separator_len(chars, i).is_some()
    })
}

fn split_compound(chars: &[char]) -> Vec<Command> {
    let mut parts = Vec::new();
    let mut quote = QuoteState::default();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        quote.step(chars, i);
        if !quote.is_quoted() {
            if let Some(len) = separator_len(chars, i) {
                push_part(&mut parts, &chars[start..i]);
                i += len;
                start = i;
                continue;
            }
        }
        i += 1;
    }
    push_part(&mut parts, &chars[start..]);

    parts
}

fn push_part(parts: &mut Vec<Command>, chars: &[char]) {
    let text: String = chars.iter().collect();
    let text = text.trim();
    if !text.is_empty() {
        parts.push(parse(text));
    }
}

fn tokenize_simple(chars: &[char]) -> Command {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut quote = QuoteState::default();

    for (i, &c) in chars.iter().enumerate() {
        if quote.step(chars, i) {
            continue;
        }
        if c.is_whitespace() && !quote.is_quoted() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    let mut tokens = tokens.into_iter();
    let executable = tokens.next().unwrap_or_default();
    Command::simple(executable, tokens.collect())
}
