//! Parsed command representation
//!
//! The result of tokenizing one line: positional arguments in the order they
//! appeared, and named parameters keyed by the name exactly as typed
//! (leading dashes included).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::{parse, ParseError};

/// Value stored for a parameter given without `=value`
pub const FLAG_VALUE: &str = "true";

/// Positional arguments and named parameters of one command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Positional arguments, left to right
    pub arguments: Vec<String>,
    /// Parameter name (with its dashes) to raw value
    pub parameters: BTreeMap<String, String>,
}

impl ParsedCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the line held no tokens at all
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.parameters.is_empty()
    }

    /// Positional argument at `index`
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    /// Value of the parameter stored under exactly `name`
    ///
    /// `name` must include the dashes used on the command line, so
    /// `--out` and `-out` are different parameters.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Whether `name` was given as a bare flag (or explicitly set to `true`)
    pub fn is_flag_set(&self, name: &str) -> bool {
        self.parameter(name) == Some(FLAG_VALUE)
    }

    /// Look up a parameter by its name without leading dashes.
    ///
    /// Returns the stored key together with its value. When several keys
    /// differ only in their dashes (`-v` and `--v`), the first in key order
    /// wins.
    pub fn find_parameter(&self, bare_name: &str) -> Option<(&str, &str)> {
        let bare_name = bare_name.trim_start_matches('-');
        self.parameters
            .iter()
            .find(|(key, _)| key.trim_start_matches('-') == bare_name)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub(crate) fn push_argument(&mut self, argument: String) {
        self.arguments.push(argument);
    }

    pub(crate) fn set_parameter(&mut self, name: String, value: String) {
        if let Some(previous) = self.parameters.insert(name, value) {
            log::trace!("Parameter overwritten, previous value {:?}", previous);
        }
    }
}

impl FromStr for ParsedCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse(line)
    }
}
