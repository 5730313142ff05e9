//! # Stream Descriptor Fetcher
//!
//! Sequential persona negotiation against the upstream player endpoint.
//!
//! Personas are probed strictly one at a time, in catalog order. Sequential
//! probing short-circuits on the first success, avoids burning quota on
//! personas after a valid one, and keeps the upstream from correlating
//! several fresh nonces to one client. A response is accepted or rejected as
//! a whole; candidate entries from different personas are never pieced
//! together, because signature schemes and tokens are persona-specific.

use crate::config::ResolveConfig;
use crate::error::{ResolveError, Result};
use crate::model::{PlayerRequest, PlayerResponse, StreamDescriptor};
use crate::nonce;
use crate::persona::{Persona, PersonaCatalog};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Negotiates stream descriptors by probing the persona catalog in order.
pub struct StreamDescriptorFetcher {
    catalog: Arc<PersonaCatalog>,
    http: Arc<dyn HttpClient>,
    config: ResolveConfig,
}

impl StreamDescriptorFetcher {
    pub fn new(
        catalog: Arc<PersonaCatalog>,
        http: Arc<dyn HttpClient>,
        config: ResolveConfig,
    ) -> Self {
        Self {
            catalog,
            http,
            config,
        }
    }

    /// Resolve `track_id` to a stream descriptor.
    ///
    /// Probes each persona once, in catalog order, with a fresh content
    /// nonce per attempt. Transport failures and invalid responses are
    /// logged and skipped; the first persona producing a valid response
    /// short-circuits the loop. With `must_validate` false, the first
    /// successfully parsed response is accepted regardless of validity.
    ///
    /// Returns `Ok(None)` when every persona has been attempted without a
    /// usable response; the caller decides whether that is a hard failure
    /// or a silent skip.
    ///
    /// # Errors
    ///
    /// Only [`ResolveError::Cancelled`], when `cancel` fires: cancellation
    /// aborts the loop immediately instead of moving to the next persona.
    #[instrument(skip(self, cancel))]
    pub async fn resolve(
        &self,
        track_id: &str,
        must_validate: bool,
        cancel: &CancellationToken,
    ) -> Result<Option<StreamDescriptor>> {
        for persona in self.catalog.iter() {
            if cancel.is_cancelled() {
                debug!("Resolution cancelled before probing {}", persona.name);
                return Err(ResolveError::Cancelled);
            }

            let cpn = nonce::generate(nonce::CONTENT_NONCE_LEN);
            info!(
                persona = %persona.name,
                client = %persona.client_name,
                version = %persona.client_version,
                platform = %persona.platform,
                "Probing persona"
            );

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                outcome = self.probe(persona, track_id, &cpn) => outcome,
            };

            match outcome {
                Ok(response) => {
                    if !must_validate || response.is_valid() {
                        info!(persona = %persona.name, "Negotiation succeeded");
                        return Ok(Some(response.into_descriptor(persona.name.clone(), cpn)));
                    }
                    debug!(
                        persona = %persona.name,
                        status = ?response.status(),
                        "Response rejected by validation, trying next persona"
                    );
                }
                Err(err) => {
                    warn!(
                        persona = %persona.name,
                        error = %err,
                        "Persona probe failed, trying next persona"
                    );
                }
            }
        }

        debug!("All personas exhausted without a valid descriptor");
        Ok(None)
    }

    /// One negotiation request under one persona.
    async fn probe(
        &self,
        persona: &Persona,
        track_id: &str,
        cpn: &str,
    ) -> Result<PlayerResponse> {
        let endpoint = if persona.supports_music_catalog {
            &self.config.music_player_url
        } else {
            &self.config.player_url
        };

        let body = PlayerRequest::new(persona, track_id, cpn);
        let mut request = HttpRequest::new(HttpMethod::Post, endpoint.as_str())
            .query_param("id", track_id)
            .query_param("t", nonce::generate(nonce::REQUEST_TAG_LEN))
            .header("X-Goog-Api-Format-Version", "2")
            .timeout(self.config.request_timeout)
            .json(&body)
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        if let Some(key) = &persona.api_key {
            request = request.query_param("key", key.clone());
        }
        if persona.is_music_client {
            request = request.header("Origin", self.config.music_origin());
        }
        for (name, value) in persona.headers() {
            request = request.header(name, value);
        }

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ResolveError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(ResolveError::UpstreamStatus {
                status: response.status,
            });
        }

        response
            .json::<PlayerResponse>()
            .map_err(|e| ResolveError::MalformedResponse(e.to_string()))
    }
}
