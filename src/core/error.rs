//! Error types and error handling for toponym.
//!
//! This module defines the error types used throughout the crate.
//! An empty mention list is not an error: every operation returns
//! an empty result for it instead.

use thiserror::Error;

/// Result type alias for toponym operations
pub type Result<T> = std::result::Result<T, ToponymError>;

/// Main error type for toponym
#[derive(Error, Debug)]
pub enum ToponymError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Entity span {start}..{end} is out of range for a document of {len} characters")]
    OutOfRange { start: usize, end: usize, len: usize },

    #[error("Entity span {start}..{end} has a negative offset")]
    NegativeOffset { start: i64, end: i64 },

    #[error("Document contains no tokens; cannot place span {start}..{end}")]
    NoTokens { start: usize, end: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ToponymError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Name of the violated contract, as reported per failing mention
    pub fn kind(&self) -> &'static str {
        match self {
            ToponymError::InvalidConfiguration(_) => "InvalidConfiguration",
            ToponymError::OutOfRange { .. }
            | ToponymError::NegativeOffset { .. }
            | ToponymError::NoTokens { .. } => "OutOfRange",
            ToponymError::IoError(_) => "Io",
            ToponymError::SerdeError(_) => "Serialization",
            ToponymError::TomlError(_) => "Toml",
        }
    }

    /// Check if this is a configuration error (bad radius, threshold, markers)
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ToponymError::InvalidConfiguration(_))
    }

    /// Check if this is an entity span that cannot be placed in the document
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ToponymError::OutOfRange { .. }
                | ToponymError::NegativeOffset { .. }
                | ToponymError::NoTokens { .. }
        )
    }
}
