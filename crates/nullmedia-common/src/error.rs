//! Common error types used throughout nullmedia.
//!
//! These cover failures that can happen without running any external tool:
//! decoding metadata strings, validating signatures and hashing files.

/// Common error type for nullmedia.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A metadata string failed the structural or per-field checks.
    #[error("malformed media info string: {0}")]
    MalformedString(String),

    /// A signature is not at least 6 lowercase hex characters.
    #[error("invalid signature: {0:?}")]
    InvalidSignature(String),

    /// Content hashing produced a digest of unexpected length.
    #[error("hash sum failed: expected {expected} hex digits, got {actual}")]
    HashFailure { expected: usize, actual: usize },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new MalformedString error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedString(msg.into())
    }

    /// Create a new InvalidSignature error.
    pub fn invalid_signature<S: Into<String>>(raw: S) -> Self {
        Self::InvalidSignature(raw.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
