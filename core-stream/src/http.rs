//! Raw HTTP media transports on reqwest.

use crate::error::{Result, StreamError};
use crate::spec::MediaRequestSpec;
use crate::traits::{MediaStream, MediaTransport};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use std::time::Duration;
use tokio_util::io::StreamReader;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(16);
const READ_TIMEOUT: Duration = Duration::from_secs(8);

/// Desktop user agent; the upstream media hosts throttle unknown clients.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; rv:91.0) Gecko/20100101 Firefox/91.0";

/// Primary HTTP byte transport with connection pooling.
pub struct HttpMediaTransport {
    client: reqwest::Client,
}

impl HttpMediaTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }

    /// Use a pre-configured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpMediaTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaTransport for HttpMediaTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        open_via(&self.client, spec).await
    }
}

/// Non-pooling direct transport, used as the last line of defense.
///
/// Keeps no idle connections so every open negotiates a fresh connection;
/// when the pooled client's connections have been poisoned by a
/// half-closed upstream, this one still gets through.
pub struct DirectHttpTransport {
    client: reqwest::Client,
}

impl DirectHttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for DirectHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaTransport for DirectHttpTransport {
    async fn open(&self, spec: &MediaRequestSpec) -> Result<MediaStream> {
        open_via(&self.client, spec).await
    }
}

async fn open_via(client: &reqwest::Client, spec: &MediaRequestSpec) -> Result<MediaStream> {
    let mut request = client.get(&spec.uri);
    for (key, value) in &spec.headers {
        request = request.header(key.as_str(), value.as_str());
    }
    // Positional range only when the caller did not set an explicit header
    if !spec.headers.keys().any(|k| k.eq_ignore_ascii_case("range")) {
        if let Some(range) = spec.range_header() {
            request = request.header(reqwest::header::RANGE, range);
        }
    }

    let response = request.send().await.map_err(classify_reqwest)?;
    let status = response.status().as_u16();
    if let Some(err) = StreamError::from_status(status, &spec.uri) {
        return Err(err);
    }

    let resolved_uri = response.url().to_string();
    let resolved_length = response.content_length();

    // A 200 to a ranged request means the host ignored the range; if the
    // requested offset lies past the real end, surface it as a range
    // mismatch so the recovery stage can strip the constraint.
    if status == 200 && spec.position > 0 {
        if let Some(total) = resolved_length {
            if spec.position >= total {
                return Err(StreamError::RangeMismatch(format!(
                    "requested offset {} past end of {}-byte resource {}",
                    spec.position, total, spec.uri
                )));
            }
        }
    }

    debug!(
        uri = %resolved_uri,
        status,
        length = ?resolved_length,
        "Opened media stream"
    );

    let stream = response.bytes_stream().map_err(std::io::Error::other);
    Ok(MediaStream {
        reader: Box::new(StreamReader::new(stream)),
        resolved_length,
        resolved_uri,
    })
}

fn classify_reqwest(err: reqwest::Error) -> StreamError {
    if err.is_timeout() {
        StreamError::TransientNetwork(format!("request timed out: {}", err))
    } else if err.is_connect() {
        StreamError::TransientNetwork(format!("connection failed: {}", err))
    } else {
        StreamError::unknown(err)
    }
}
