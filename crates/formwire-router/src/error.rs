//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the request.
    #[error("no route matched: {method} {path}")]
    NotFound { method: String, path: String },

    /// Method not allowed for this route.
    #[error("method not allowed: {method} for {path}")]
    MethodNotAllowed { method: String, path: String },

    /// Invalid path pattern.
    #[error("invalid path pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The request body could not be decoded.
    #[error("failed to parse request body: {0}")]
    BodyParse(String),
}

impl From<serde_urlencoded::de::Error> for RouterError {
    fn from(err: serde_urlencoded::de::Error) -> Self {
        Self::BodyParse(err.to_string())
    }
}

impl From<multer::Error> for RouterError {
    fn from(err: multer::Error) -> Self {
        Self::BodyParse(err.to_string())
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
