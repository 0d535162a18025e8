//! Line session
//!
//! Reads lines, parses each one and writes the rendered result or a
//! diagnostic. A failing line does not end the session.

use std::io::{self, BufRead, Write};

use termline_core::parse;
use thiserror::Error;

use crate::config::Config;
use crate::render::{render_command, render_error};

/// Errors that end a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Non-blank lines handled
    pub lines: usize,
    pub parsed: usize,
    pub failed: usize,
}

impl SessionStats {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// What happened to a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Parsed; holds the rendered result
    Parsed(String),
    /// Rejected; holds the rendered diagnostic
    Failed(String),
    /// Nothing but whitespace
    Blank,
}

pub struct Session<'a> {
    config: &'a Config,
    interactive: bool,
    stats: SessionStats,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            interactive: false,
            stats: SessionStats::default(),
        }
    }

    /// Write prompts before each line (only if the config enables them)
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Parse and render one line
    pub fn handle_line(&mut self, line: &str) -> Result<LineOutcome, SessionError> {
        if line.trim().is_empty() {
            return Ok(LineOutcome::Blank);
        }

        self.stats.lines += 1;
        match parse(line) {
            Ok(command) => {
                log::debug!(
                    "Line {}: {} arguments, {} parameters",
                    self.stats.lines,
                    command.arguments.len(),
                    command.parameters.len()
                );
                self.stats.parsed += 1;
                let rendered = render_command(&command, self.config.output.format)?;
                Ok(LineOutcome::Parsed(rendered))
            }
            Err(err) => {
                log::debug!("Line {} rejected: {}", self.stats.lines, err);
                self.stats.failed += 1;
                let rendered = render_error(&err, &self.config.output)?;
                Ok(LineOutcome::Failed(rendered))
            }
        }
    }

    /// Handle a single line given up front
    pub fn run_line<W: Write>(
        &mut self,
        line: &str,
        mut output: W,
    ) -> Result<SessionStats, SessionError> {
        match self.handle_line(line)? {
            LineOutcome::Parsed(text) | LineOutcome::Failed(text) => writeln!(output, "{}", text)?,
            LineOutcome::Blank => {}
        }
        output.flush()?;
        Ok(self.stats)
    }

    /// Read lines until end of input or an exit word
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<SessionStats, SessionError> {
        log::info!("Session started");
        let mut buf = String::new();

        loop {
            if self.interactive && self.config.session.echo_prompt {
                write!(output, "{}", self.config.session.prompt)?;
                output.flush()?;
            }

            buf.clear();
            if input.read_line(&mut buf)? == 0 {
                break;
            }
            let line = buf.trim_end_matches(&['\n', '\r'][..]);

            if self.config.session.is_exit_word(line) {
                break;
            }

            match self.handle_line(line)? {
                LineOutcome::Parsed(text) | LineOutcome::Failed(text) => {
                    writeln!(output, "{}", text)?;
                }
                LineOutcome::Blank => {}
            }
        }

        output.flush()?;
        log::info!(
            "Session finished: {} lines, {} failed",
            self.stats.lines,
            self.stats.failed
        );
        Ok(self.stats)
    }
}
