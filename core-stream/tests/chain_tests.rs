//! Integration tests for the composed production transport chain.

use async_trait::async_trait;
use core_stream::{
    production, Backoff, ChainLayout, MediaRequestSpec, MediaStream, MediaTransport, RetryConfig,
    SpecResolver, StreamError,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Transport stub that fails with the scripted errors in order, then
/// succeeds forever, recording every open.
struct ScriptedTransport {
    script: Mutex<VecDeque<StreamError>>,
    opens: AtomicUsize,
    specs: Mutex<Vec<MediaRequestSpec>>,
}

impl ScriptedTransport {
    fn new(errors: Vec<StreamError>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(errors.into()),
            opens: AtomicUsize::new(0),
            specs: Mutex::new(Vec::new()),
        })
    }

    fn succeeding() -> Arc<Self> {
        Self::new(Vec::new())
    }

    fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    fn spec(&self, index: usize) -> MediaRequestSpec {
        self.specs.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl MediaTransport for ScriptedTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> core_stream::Result<MediaStream> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.specs.lock().unwrap().push(spec.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(MediaStream {
                reader: Box::new(tokio::io::empty()),
                resolved_length: Some(0),
                resolved_uri: spec.uri.clone(),
            }),
        }
    }
}

fn no_resolver() -> SpecResolver {
    Arc::new(|_, _| None)
}

fn layout(
    raw: Arc<ScriptedTransport>,
    secondary: Arc<ScriptedTransport>,
    last_resort: Arc<ScriptedTransport>,
    resolver: SpecResolver,
    retry: RetryConfig,
) -> ChainLayout {
    ChainLayout {
        raw,
        secondary,
        spec_resolver: resolver,
        last_resort,
        retry,
        cancel: CancellationToken::new(),
    }
}

fn ranged_spec() -> MediaRequestSpec {
    MediaRequestSpec::new("https://media.example/stream").with_range(65536, Some(131072))
}

#[tokio::test(start_paused = true)]
async fn range_recovery_does_not_consume_retry_budget() {
    let raw = ScriptedTransport::new(vec![StreamError::RangeMismatch("HTTP 416".into())]);
    let secondary = ScriptedTransport::succeeding();
    let last_resort = ScriptedTransport::succeeding();

    let retry = RetryConfig {
        max_attempts: 3,
        backoff: Backoff::Exponential {
            base: Duration::from_secs(1),
        },
    };
    let chain = production(layout(
        raw.clone(),
        secondary.clone(),
        last_resort.clone(),
        no_resolver(),
        retry,
    ));

    let start = tokio::time::Instant::now();
    chain.open(&ranged_spec()).await.unwrap();

    // Exactly two underlying opens: the ranged failure and the unranged
    // recovery. No backoff sleep was incurred.
    assert_eq!(raw.opens(), 2);
    assert!(raw.spec(0).has_range());
    assert!(!raw.spec(1).has_range());
    assert_eq!(tokio::time::Instant::now(), start);
    assert_eq!(secondary.opens(), 0);
    assert_eq!(last_resort.opens(), 0);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    let raw = ScriptedTransport::new(vec![
        StreamError::TransientNetwork("reset".into()),
        StreamError::TransientNetwork("reset".into()),
        StreamError::TransientNetwork("reset".into()),
    ]);
    let secondary = ScriptedTransport::succeeding();
    let last_resort = ScriptedTransport::succeeding();

    let chain = production(layout(
        raw.clone(),
        secondary.clone(),
        last_resort.clone(),
        no_resolver(),
        RetryConfig::default(),
    ));

    chain.open(&ranged_spec()).await.unwrap();

    assert_eq!(raw.opens(), 4);
    assert_eq!(last_resort.opens(), 0);
}

#[tokio::test]
async fn permanent_failure_falls_through_to_direct_transport() {
    let raw = ScriptedTransport::new(vec![StreamError::UnplayableSource("HTTP 403".into())]);
    let secondary = ScriptedTransport::succeeding();
    let last_resort = ScriptedTransport::succeeding();

    let chain = production(layout(
        raw.clone(),
        secondary.clone(),
        last_resort.clone(),
        no_resolver(),
        RetryConfig::default(),
    ));

    chain.open(&ranged_spec()).await.unwrap();

    // Non-retryable: one attempt on the chain, then the direct transport
    assert_eq!(raw.opens(), 1);
    assert_eq!(last_resort.opens(), 1);
}

#[tokio::test(start_paused = true)]
async fn full_exhaustion_surfaces_chain_failure() {
    let raw = ScriptedTransport::new(
        (0..10)
            .map(|_| StreamError::TransientNetwork("reset".into()))
            .collect(),
    );
    let secondary = ScriptedTransport::succeeding();
    let last_resort =
        ScriptedTransport::new(vec![StreamError::UnplayableSource("direct failed".into())]);

    let retry = RetryConfig {
        max_attempts: 3,
        backoff: Backoff::Fixed(Duration::from_millis(2500)),
    };
    let chain = production(layout(
        raw.clone(),
        secondary.clone(),
        last_resort.clone(),
        no_resolver(),
        retry,
    ));

    let err = chain.open(&ranged_spec()).await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(raw.opens(), 3);
    assert_eq!(last_resort.opens(), 1);
}

#[tokio::test]
async fn dead_url_is_re_resolved_onto_secondary_transport() {
    let raw = ScriptedTransport::new(vec![StreamError::UnplayableSource("dead URL".into())]);
    let secondary = ScriptedTransport::succeeding();
    let last_resort = ScriptedTransport::succeeding();

    let resolver: SpecResolver = Arc::new(|spec, err| {
        err.is_unplayable().then(|| {
            MediaRequestSpec::new("https://media.example/refreshed")
                .with_range(spec.position, spec.length)
        })
    });

    let chain = production(layout(
        raw.clone(),
        secondary.clone(),
        last_resort.clone(),
        resolver,
        RetryConfig::default(),
    ));

    let stream = chain.open(&ranged_spec()).await.unwrap();

    assert_eq!(stream.resolved_uri, "https://media.example/refreshed");
    assert_eq!(raw.opens(), 1);
    assert_eq!(secondary.opens(), 1);
    assert_eq!(secondary.spec(0).position, 65536);
    assert_eq!(last_resort.opens(), 0);
}

#[tokio::test]
async fn cancelled_chain_reports_cancellation_not_failure() {
    let raw = ScriptedTransport::succeeding();
    let secondary = ScriptedTransport::succeeding();
    let last_resort = ScriptedTransport::succeeding();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let chain = production(ChainLayout {
        raw: raw.clone(),
        secondary,
        spec_resolver: no_resolver(),
        last_resort: last_resort.clone(),
        retry: RetryConfig::default(),
        cancel,
    });

    let err = chain.open(&ranged_spec()).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(raw.opens(), 0);
    // Cancellation must not trigger the last-resort transport either
    assert_eq!(last_resort.opens(), 0);
}
