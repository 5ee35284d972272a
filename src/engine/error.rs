//! Script errors

use thiserror::Error;

use crate::repl::HostError;

/// Error raised while parsing or running a chunk
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{0}")]
    Runtime(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl EngineError {
    pub(crate) fn runtime(message: impl Into<String>) -> Self {
        EngineError::Runtime(message.into())
    }
}
