//! Structured form of a parsed command line

use serde::Serialize;

/// A parsed command line.
///
/// A `Compound` is produced when the input contains an unquoted `&&`, `||`
/// or `;`. Its parts are flat and in source order; there is no operator
/// precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Command {
    /// A single executable with its arguments
    Simple {
        executable: String,
        arguments: Vec<String>,
    },

    /// Several commands joined by `&&`, `||` or `;`
    Compound { parts: Vec<Command> },
}

impl Command {
    /// Create a simple command
    pub fn simple(executable: impl Into<String>, arguments: Vec<String>) -> Self {
        Command::Simple {
            executable: executable.into(),
            arguments,
        }
    }

    /// Check if this is a compound command
    pub fn is_compound(&self) -> bool {
        matches!(self, Command::Compound { .. })
    }

    /// Representative executable for logging.
    ///
    /// For a compound this is the executable of its first part, or `""` if
    /// it has none.
    pub fn executable(&self) -> &str {
        match self {
            Command::Simple { executable, .. } => executable,
            Command::Compound { parts } => parts.first().map(Command::executable).unwrap_or(""),
        }
    }

    /// Visit every simple command in pre-order until `visit` returns `Some`
    pub fn find_leaf<T>(&self, visit: &mut impl FnMut(&str, &[String]) -> Option<T>) -> Option<T> {
        match self {
            Command::Simple {
                executable,
                arguments,
            } => visit(executable.as_str(), arguments.as_slice()),
            Command::Compound { parts } => parts
                .iter()
                .find_map(|part| part.find_leaf(&mut *visit)),
        }
    }
}

/// Text of a simple command as the blacklist sees it: the executable, one
/// space, then the arguments joined by single spaces.
pub fn leaf_text(executable: &str, arguments: &[String]) -> String {
    format!("{} {}", executable, arguments.join(" "))
}
