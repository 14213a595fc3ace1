//! Error types for the digest

use thiserror::Error;

/// Digest-wide error type
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline error in category {category}: {message}")]
    Pipeline { category: String, message: String },
}

impl DigestError {
    pub fn config(msg: impl Into<String>) -> Self {
        DigestError::Config(msg.into())
    }

    pub fn pipeline(category: impl Into<String>, message: impl Into<String>) -> Self {
        DigestError::Pipeline {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for digest operations
pub type DigestResult<T> = Result<T, DigestError>;
