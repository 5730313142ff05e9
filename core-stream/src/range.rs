//! Range-error recovery stage.

use crate::error::Result;
use crate::spec::MediaRequestSpec;
use crate::traits::{MediaStream, MediaTransport};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Recovers from range failures by retrying exactly once without range
/// constraints.
///
/// Some upstream hosts serve stale `Content-Length` values; range math based
/// on those requests bytes past the real end of file, which surfaces as an
/// end-of-stream error or HTTP 416. The unranged retry reads from the start
/// and lets the consumer skip to the desired offset. Any other failure
/// propagates unchanged.
pub struct RangeRecoveryTransport {
    inner: Arc<dyn MediaTransport>,
}

impl RangeRecoveryTransport {
    pub fn new(inner: Arc<dyn MediaTransport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MediaTransport for RangeRecoveryTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        match self.inner.open(spec).await {
            Err(err) if err.is_range_mismatch() => {
                warn!(
                    uri = %spec.uri,
                    position = spec.position,
                    error = %err,
                    "Range rejected by host, retrying without range constraints"
                );
                self.inner.open(&spec.without_range()).await
            }
            other => other,
        }
    }
}
