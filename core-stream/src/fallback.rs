//! Fallback stages: spec-resolving failover and the last-resort transport.

use crate::error::{Result, StreamError};
use crate::spec::MediaRequestSpec;
use crate::traits::{MediaStream, MediaTransport};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Maps a failed spec to an alternate one, or `None` when no alternative
/// exists for this failure.
pub type SpecResolver =
    Arc<dyn Fn(&MediaRequestSpec, &StreamError) -> Option<MediaRequestSpec> + Send + Sync>;

/// On open failure, asks a caller-supplied resolver for an alternate spec and
/// retries exactly once on the secondary transport.
///
/// If the resolver yields nothing, or the secondary transport fails as well,
/// the original failure is surfaced. Unclassified causes have already been
/// wrapped as [`StreamError::Unknown`] at the raw-transport boundary; this
/// stage logs them with their cause chain before surfacing.
pub struct ResolvingFallbackTransport {
    primary: Arc<dyn MediaTransport>,
    secondary: Arc<dyn MediaTransport>,
    resolver: SpecResolver,
}

impl ResolvingFallbackTransport {
    pub fn new(
        primary: Arc<dyn MediaTransport>,
        secondary: Arc<dyn MediaTransport>,
        resolver: SpecResolver,
    ) -> Self {
        Self {
            primary,
            secondary,
            resolver,
        }
    }
}

#[async_trait]
impl MediaTransport for ResolvingFallbackTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        let err = match self.primary.open(spec).await {
            Ok(stream) => return Ok(stream),
            Err(err) => err,
        };

        if err.is_cancelled() {
            return Err(err);
        }

        if let Some(resolved) = (self.resolver)(spec, &err) {
            info!(
                uri = %spec.uri,
                resolved_uri = %resolved.uri,
                "Resolved alternate spec, switching to secondary transport"
            );
            match self.secondary.open(&resolved).await {
                Ok(stream) => return Ok(stream),
                Err(secondary_err) => {
                    warn!(
                        error = %secondary_err,
                        "Secondary transport failed, surfacing original failure"
                    );
                }
            }
        }

        match &err {
            StreamError::Unknown(cause) => {
                error!(error = %err, cause = ?cause, "Unclassified media open failure")
            }
            _ => error!(error = %err, uri = %spec.uri, "Media open failed"),
        }
        Err(err)
    }
}

/// Last line of defense: if the wrapped transport chain fails outright, try
/// one open on a wholly separate transport before giving up.
///
/// The fallback sees the original, unmodified spec. When it fails too, the
/// upstream chain's failure is the one surfaced; the fallback's is only
/// logged.
pub struct LastResortTransport {
    upstream: Arc<dyn MediaTransport>,
    fallback: Arc<dyn MediaTransport>,
}

impl LastResortTransport {
    pub fn new(upstream: Arc<dyn MediaTransport>, fallback: Arc<dyn MediaTransport>) -> Self {
        Self { upstream, fallback }
    }
}

#[async_trait]
impl MediaTransport for LastResortTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        let err = match self.upstream.open(spec).await {
            Ok(stream) => return Ok(stream),
            Err(err) => err,
        };

        if err.is_cancelled() {
            return Err(err);
        }

        warn!(
            uri = %spec.uri,
            error = %err,
            "Transport chain exhausted, trying direct transport"
        );
        match self.fallback.open(spec).await {
            Ok(stream) => Ok(stream),
            Err(fallback_err) => {
                warn!(error = %fallback_err, "Direct transport failed as well");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubTransport {
        fail_with: Mutex<Vec<StreamError>>,
        opens: AtomicUsize,
        specs: Mutex<Vec<MediaRequestSpec>>,
    }

    impl StubTransport {
        fn succeeding() -> Arc<Self> {
            Self::with_failures(Vec::new())
        }

        fn with_failures(errors: Vec<StreamError>) -> Arc<Self> {
            Arc::new(Self {
                fail_with: Mutex::new(errors),
                opens: AtomicUsize::new(0),
                specs: Mutex::new(Vec::new()),
            })
        }

        fn opens(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }

        fn last_spec(&self) -> MediaRequestSpec {
            self.specs.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaTransport for StubTransport {
        async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.specs.lock().unwrap().push(spec.clone());
            let mut failures = self.fail_with.lock().unwrap();
            if failures.is_empty() {
                Ok(MediaStream {
                    reader: Box::new(tokio::io::empty()),
                    resolved_length: None,
                    resolved_uri: spec.uri.clone(),
                })
            } else {
                Err(failures.remove(0))
            }
        }
    }

    fn spec() -> MediaRequestSpec {
        MediaRequestSpec::new("https://media.example/a")
    }

    #[tokio::test]
    async fn resolver_switches_to_secondary_with_new_spec() {
        let primary =
            StubTransport::with_failures(vec![StreamError::UnplayableSource("dead URL".into())]);
        let secondary = StubTransport::succeeding();
        let resolver: SpecResolver =
            Arc::new(|_, _| Some(MediaRequestSpec::new("https://media.example/b")));

        let transport =
            ResolvingFallbackTransport::new(primary.clone(), secondary.clone(), resolver);
        transport.open(&spec()).await.unwrap();

        assert_eq!(primary.opens(), 1);
        assert_eq!(secondary.opens(), 1);
        assert_eq!(secondary.last_spec().uri, "https://media.example/b");
    }

    #[tokio::test]
    async fn resolver_none_surfaces_original_failure() {
        let primary =
            StubTransport::with_failures(vec![StreamError::UnplayableSource("dead URL".into())]);
        let secondary = StubTransport::succeeding();
        let resolver: SpecResolver = Arc::new(|_, _| None);

        let transport =
            ResolvingFallbackTransport::new(primary.clone(), secondary.clone(), resolver);
        let err = transport.open(&spec()).await.unwrap_err();

        assert!(err.is_unplayable());
        assert_eq!(secondary.opens(), 0);
    }

    #[tokio::test]
    async fn secondary_failure_surfaces_original_failure() {
        let primary =
            StubTransport::with_failures(vec![StreamError::TransientNetwork("reset".into())]);
        let secondary =
            StubTransport::with_failures(vec![StreamError::UnplayableSource("nope".into())]);
        let resolver: SpecResolver = Arc::new(|spec, _| Some(spec.clone()));

        let transport =
            ResolvingFallbackTransport::new(primary.clone(), secondary.clone(), resolver);
        let err = transport.open(&spec()).await.unwrap_err();

        // The primary's transient failure wins over the secondary's
        assert!(err.is_transient());
        assert_eq!(secondary.opens(), 1);
    }

    #[tokio::test]
    async fn cancellation_is_never_resolved() {
        let primary = StubTransport::with_failures(vec![StreamError::Cancelled]);
        let secondary = StubTransport::succeeding();
        let resolver: SpecResolver = Arc::new(|spec, _| Some(spec.clone()));

        let transport =
            ResolvingFallbackTransport::new(primary.clone(), secondary.clone(), resolver);
        let err = transport.open(&spec()).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(secondary.opens(), 0);
    }

    #[tokio::test]
    async fn last_resort_succeeds_when_chain_fails() {
        let upstream =
            StubTransport::with_failures(vec![StreamError::TransientNetwork("reset".into())]);
        let fallback = StubTransport::succeeding();

        let transport = LastResortTransport::new(upstream.clone(), fallback.clone());
        transport.open(&spec()).await.unwrap();

        assert_eq!(upstream.opens(), 1);
        assert_eq!(fallback.opens(), 1);
    }

    #[tokio::test]
    async fn last_resort_failure_surfaces_original() {
        let upstream =
            StubTransport::with_failures(vec![StreamError::UnplayableSource("primary".into())]);
        let fallback =
            StubTransport::with_failures(vec![StreamError::TransientNetwork("fallback".into())]);

        let transport = LastResortTransport::new(upstream.clone(), fallback.clone());
        let err = transport.open(&spec()).await.unwrap_err();

        assert!(matches!(err, StreamError::UnplayableSource(msg) if msg == "primary"));
    }
}
