//! Core transport trait for media byte streams.

use crate::error::Result;
use crate::spec::MediaRequestSpec;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// An opened media stream: a readable byte source plus what the transport
/// learned about it while opening.
pub struct MediaStream {
    /// Byte source positioned at the spec's offset.
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
    /// Number of readable bytes, when the server reported one.
    pub resolved_length: Option<u64>,
    /// URI the bytes are actually being served from (after redirects).
    pub resolved_uri: String,
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("resolved_length", &self.resolved_length)
            .field("resolved_uri", &self.resolved_uri)
            .finish_non_exhaustive()
    }
}

/// A source of media byte streams.
///
/// Implemented both by raw transports (HTTP) and by every decorator stage in
/// the acquisition chain; stages hold the next transport and call through.
/// Implementations must be safe to share across I/O workers.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Open a byte stream for `spec`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`StreamError`](crate::error::StreamError); the
    /// caller's recovery options depend on the variant, so raw transports
    /// must classify as precisely as they can.
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream>;
}
