use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Remote playlist fetch failed: {0}")]
    RemoteFetch(String),

    #[error("Remote playlist malformed: {0}")]
    MalformedRemote(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Sync cancelled")]
    Cancelled,
}

impl SyncError {
    /// Returns `true` if the failure is a cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SyncError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
