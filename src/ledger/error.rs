//! Ledger error types

use thiserror::Error;

/// Errors that can occur in the ledger layer
///
/// Reads never produce these: unreadable state degrades to an empty
/// collection. Only a failed append (store write or serialization) errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Store write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry collection could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
