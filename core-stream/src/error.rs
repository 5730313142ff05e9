//! # Stream Error Types
//!
//! Failure taxonomy for media byte-stream acquisition. The chain stages key
//! their recovery decisions off these variants, so classification happens as
//! close to the raw transport as possible.

use thiserror::Error;

/// Errors that can occur while opening or reading a media stream.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Transient network fault (reset, timeout, 5xx). Retryable.
    #[error("Transient network failure: {0}")]
    TransientNetwork(String),

    /// Requested byte range cannot be satisfied (HTTP 416 or read past EOF).
    ///
    /// Recovered internally by the range-recovery stage; callers only see
    /// this when recovery itself failed.
    #[error("Range not satisfiable: {0}")]
    RangeMismatch(String),

    /// The source is permanently unplayable (dead URL, upstream rejection).
    /// Not retryable.
    #[error("Source cannot be played: {0}")]
    UnplayableSource(String),

    /// The enclosing operation was cancelled. Never retried, never wrapped.
    #[error("Stream operation cancelled")]
    Cancelled,

    /// Unclassified failure, wrapped with its cause preserved for logging.
    /// Treated as non-retryable unless a retry predicate says otherwise.
    #[error("Unknown stream failure: {0}")]
    Unknown(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Wrap an arbitrary error as [`StreamError::Unknown`].
    pub fn unknown(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StreamError::Unknown(Box::new(err))
    }

    /// Returns `true` if the failure is transient and worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, StreamError::TransientNetwork(_))
    }

    /// Returns `true` if the failure is a range/EOF mismatch.
    pub fn is_range_mismatch(&self) -> bool {
        matches!(self, StreamError::RangeMismatch(_))
    }

    /// Returns `true` if the failure is permanent for this source.
    pub fn is_unplayable(&self) -> bool {
        matches!(self, StreamError::UnplayableSource(_))
    }

    /// Returns `true` if the failure is a cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StreamError::Cancelled)
    }

    /// Classify an HTTP status code, if it is an error status.
    pub fn from_status(status: u16, context: &str) -> Option<Self> {
        match status {
            200..=399 => None,
            416 => Some(StreamError::RangeMismatch(format!(
                "HTTP 416 for {}",
                context
            ))),
            400..=499 => Some(StreamError::UnplayableSource(format!(
                "HTTP {} for {}",
                status, context
            ))),
            _ => Some(StreamError::TransientNetwork(format!(
                "HTTP {} for {}",
                status, context
            ))),
        }
    }

    /// Classify an I/O error by kind.
    pub fn from_io(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::UnexpectedEof => {
                StreamError::RangeMismatch(format!("unexpected end of stream: {}", err))
            }
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::TimedOut => StreamError::TransientNetwork(err.to_string()),
            _ => StreamError::unknown(err),
        }
    }
}

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
