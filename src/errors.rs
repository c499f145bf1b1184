//! Error types for transcript_topics
//!
//! One enum covers the whole pipeline. Variants map to the failure
//! classes a run can hit: bad input, bad configuration, a corpus that
//! degenerates to nothing after filtering, and output I/O.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TopicError>;

/// Main error type for transcript_topics
#[derive(Error, Debug)]
pub enum TopicError {
    /// Input directory missing, no transcript files, or a run target
    /// whose filtered corpus is empty
    #[error("Input error: {message}")]
    Input { message: String },

    /// Configuration rejected before any expensive computation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Every document's token stream was empty after filtering
    #[error("Empty vocabulary: {message}")]
    EmptyVocabulary { message: String },

    /// Output file could not be created or written
    #[error("Output error: {message}")]
    Output {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl TopicError {
    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an empty vocabulary error
    pub fn empty_vocabulary(message: impl Into<String>) -> Self {
        Self::EmptyVocabulary {
            message: message.into(),
        }
    }

    /// Create an output error without an underlying I/O cause
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
            source: None,
        }
    }

    /// Create an output error wrapping an I/O cause
    pub fn output_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check whether this error came from the data side (as opposed to
    /// configuration or output). A best-effort batch keeps going past
    /// data-side failures of individual run targets.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::EmptyVocabulary { .. })
    }
}
