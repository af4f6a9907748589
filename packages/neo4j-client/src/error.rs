//! Error types for the Neo4j HTTP client.

use thiserror::Error;

/// Result type for Neo4j client operations.
pub type Result<T> = std::result::Result<T, Neo4jError>;

/// Neo4j client errors.
#[derive(Debug, Error)]
pub enum Neo4jError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the HTTP endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Error reported by the database in the response body
    #[error("{code}: {message}")]
    Database { code: String, message: String },

    /// Transaction begin response carried no usable transaction URL
    #[error("transaction response carried no transaction location")]
    MissingTransaction,

    /// Response had a different number of result sets than statements sent
    #[error("expected {expected} result set(s), got {actual}")]
    UnexpectedResults { expected: usize, actual: usize },
}

impl Neo4jError {
    /// True if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Neo4jError::Http(e) if e.is_timeout())
    }

    /// True if no connection to the endpoint could be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Neo4jError::Http(e) if e.is_connect())
    }
}
