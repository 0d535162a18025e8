//! termline-core: Command line tokenizer
//!
//! This crate turns one line of shell-like text into a [`ParsedCommand`]:
//! - Positional arguments, in order
//! - Named parameters (`-flag`, `--name=value`, `--name = "quoted value"`)
//!
//! Values are never interpreted: no type coercion, variable expansion or
//! globbing.

pub mod command;
pub mod parser;

pub use command::{ParsedCommand, FLAG_VALUE};
pub use parser::{parse, ParseError, ParseErrorKind};
