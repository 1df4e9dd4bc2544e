//! Common error types for Readwise

use thiserror::Error;

/// Common result type for Readwise operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Readwise client
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: connection refused, DNS, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation requires a signed-in identity
    #[error("Not signed in")]
    NotSignedIn,
}

impl Error {
    /// True for 401/403 responses, which send the user back to sign-in
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Error::Http { status: 401 | 403, .. })
    }
}
