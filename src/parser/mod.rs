//! Command line parsing for shell-sentinel
//!
//! Turns raw command text into a [`Command`] tree: compound commands are
//! split on unquoted `&&`, `||` and `;`, and each part is tokenized into an
//! executable and its arguments.

pub mod command;
pub mod tokenize;

pub use command::Command;
pub use tokenize::parse;
