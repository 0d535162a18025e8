//! termline-app: Application logic for termline
//!
//! Configuration, rendering of parse results and diagnostics, and the line
//! session that feeds input to `termline-core`.

pub mod cli;
pub mod config;
pub mod render;
pub mod session;

pub use cli::Cli;
pub use config::{load_config, load_config_from, save_config, Config, OutputFormat};
pub use session::{LineOutcome, Session, SessionError, SessionStats};
