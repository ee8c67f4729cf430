//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, or validating a menu document.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem error reading or bootstrapping the document.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// YAML syntax error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message} ({trail})")]
    /// Structural problem in the menu tree.
    Validation {
        /// Human-readable node trail, e.g. `menu[3] > Tools[2]`.
        trail: String,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly message including the path or node trail.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse { path, message } => match path {
                Some(p) => format!("Config parse error at {}: {}", p.display(), message),
                None => format!("Config parse error: {}", message),
            },
            Self::Validation { trail, message } => format!("{} ({})", message, trail),
        }
    }
}
