//! CLI argument parsing for termline

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, OutputFormat};

/// termline - split shell-like command lines into arguments and parameters
#[derive(Parser, Debug)]
#[command(name = "termline")]
#[command(about = "Split shell-like command lines into arguments and parameters")]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Prompt for interactive sessions, overrides the config file
    #[arg(long = "prompt")]
    pub prompt: Option<String>,

    /// Log level
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Line to parse; words are joined with single spaces, so quote the
    /// whole line to keep its spacing. Put `--` before a line that starts
    /// with `-`. Reads stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub line: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The line given on the command line, if any
    pub fn line(&self) -> Option<String> {
        if self.line.is_empty() {
            None
        } else {
            Some(self.line.join(" "))
        }
    }

    /// Apply command-line overrides to a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(ref prompt) = self.prompt {
            config.session.prompt = prompt.clone();
        }
    }
}
