//! Error types for Ripple
//!
//! Statement-level errors never surface here: the evaluation engine reports them
//! through the console. These are host-level failures (terminal, config, files).

use std::path::PathBuf;

use thiserror::Error;

use crate::util::config::ConfigError;

/// Host-level error
#[derive(Debug, Error)]
pub enum ReplError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or saved
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Terminal could not be set up or restored
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Line editor failure
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Definitions file could not be read
    #[error("cannot read definitions file {}: {source}", path.display())]
    IncludeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ReplError>;
