use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the quickmenu engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed.
    #[error("Config error: {0}")]
    Config(#[from] config::Error),

    /// A platform shell operation failed.
    #[error("Shell error: {0}")]
    Shell(String),
}
