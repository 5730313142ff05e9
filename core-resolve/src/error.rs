use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Transport-level failure while probing a persona. Logged and skipped
    /// by the persona loop, never surfaced from `resolve` itself.
    #[error("Transport failure during negotiation: {0}")]
    Transport(String),

    #[error("Upstream rejected negotiation with HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("Malformed negotiation response: {0}")]
    MalformedResponse(String),

    #[error("Signature decipherment failed: {0}")]
    Decipher(String),

    #[error("Descriptor carries no playable stream entry")]
    NoPlayableStream,

    #[error("Resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Returns `true` if the failure is a cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
