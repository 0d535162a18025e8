//! termline - split shell-like command lines into arguments and parameters
//!
//! Parses the line given on the command line, or every line read from
//! standard input, and prints the positional arguments and parameters.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use termline_app::{config, Cli, Config, Session};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str()))
        .init();

    let mut config = match cli.config {
        Some(ref path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_config().unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };
    cli.apply_to(&mut config);

    let mut session = Session::new(&config);
    let stdout = io::stdout();
    let stats = match cli.line() {
        Some(line) => session.run_line(&line, stdout.lock())?,
        None => {
            let stdin = io::stdin();
            session.set_interactive(stdin.is_terminal());
            session.run(stdin.lock(), stdout.lock())?
        }
    };

    if stats.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
