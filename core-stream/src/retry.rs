//! Retry stage with configurable backoff.

use crate::config::RetryConfig;
use crate::error::{Result, StreamError};
use crate::spec::MediaRequestSpec;
use crate::traits::{MediaStream, MediaTransport};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Decides whether a failed open is worth another attempt.
pub type RetryPredicate = Arc<dyn Fn(&StreamError) -> bool + Send + Sync>;

/// Wraps `open()` with up to `max_attempts` tries.
///
/// Retries are gated by a predicate over the failure (default: transient
/// network faults only). Backoff sleeps run on the calling I/O task and are
/// interrupted by the cancellation token, which is also polled before every
/// attempt. Exhausting all attempts re-throws the last failure unchanged.
pub struct RetryTransport {
    inner: Arc<dyn MediaTransport>,
    config: RetryConfig,
    predicate: RetryPredicate,
    cancel: CancellationToken,
}

impl RetryTransport {
    /// Retry transient failures according to `config`.
    pub fn new(
        inner: Arc<dyn MediaTransport>,
        config: RetryConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner,
            config,
            predicate: Arc::new(|err| err.is_transient()),
            cancel,
        }
    }

    /// Replace the retry predicate.
    pub fn with_predicate(mut self, predicate: RetryPredicate) -> Self {
        self.predicate = predicate;
        self
    }
}

#[async_trait]
impl MediaTransport for RetryTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        let mut attempt: u32 = 0;
        loop {
            if self.cancel.is_cancelled() {
                return Err(StreamError::Cancelled);
            }

            if attempt > 0 {
                debug!(
                    attempt,
                    max_attempts = self.config.max_attempts,
                    uri = %spec.uri,
                    "Retrying media open"
                );
            }

            let err = match self.inner.open(spec).await {
                Ok(stream) => return Ok(stream),
                Err(err) => err,
            };

            if err.is_cancelled() {
                return Err(err);
            }

            attempt += 1;
            if attempt >= self.config.max_attempts {
                warn!(
                    attempts = attempt,
                    uri = %spec.uri,
                    error = %err,
                    "Max open attempts exceeded, surfacing last failure"
                );
                return Err(err);
            }
            if !(self.predicate)(&err) {
                debug!(uri = %spec.uri, error = %err, "Retry policy declined retry");
                return Err(err);
            }

            let delay = self.config.backoff.delay(attempt - 1);
            debug!(
                delay_ms = delay.as_millis() as u64,
                attempt,
                "Retry policy accepted retry, backing off"
            );
            tokio::select! {
                _ = self.cancel.cancelled() => return Err(StreamError::Cancelled),
                _ = sleep(delay) => {}
            }
        }
    }
}
