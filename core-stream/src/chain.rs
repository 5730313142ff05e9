//! Production composition of the transport chain.

use crate::config::RetryConfig;
use crate::fallback::{LastResortTransport, ResolvingFallbackTransport, SpecResolver};
use crate::range::RangeRecoveryTransport;
use crate::retry::RetryTransport;
use crate::traits::MediaTransport;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Parts of the production transport chain.
pub struct ChainLayout {
    /// Raw transport that actually opens HTTP streams.
    pub raw: Arc<dyn MediaTransport>,
    /// Transport used after the spec resolver produces an alternate spec.
    pub secondary: Arc<dyn MediaTransport>,
    /// Maps a failed spec to an alternate one (e.g. a re-resolved URL).
    pub spec_resolver: SpecResolver,
    /// Wholly separate transport tried once when the chain is exhausted.
    pub last_resort: Arc<dyn MediaTransport>,
    /// Retry/backoff policy.
    pub retry: RetryConfig,
    /// Cancellation signal for the playback attempt this chain serves.
    pub cancel: CancellationToken,
}

/// Assemble the production chain, outermost stage first:
///
/// last-resort → retry → range recovery → resolving fallback → raw.
///
/// Range recovery sits inside the retry stage so a recovered 416 never counts
/// against the retry budget (and incurs no backoff sleep); the last-resort
/// transport sits outside everything so it fires only after retries are
/// spent.
pub fn production(layout: ChainLayout) -> Arc<dyn MediaTransport> {
    let resolving = Arc::new(ResolvingFallbackTransport::new(
        layout.raw,
        layout.secondary,
        layout.spec_resolver,
    ));
    let recovering = Arc::new(RangeRecoveryTransport::new(resolving));
    let retrying = Arc::new(RetryTransport::new(
        recovering,
        layout.retry,
        layout.cancel,
    ));
    Arc::new(LastResortTransport::new(retrying, layout.last_resort))
}
