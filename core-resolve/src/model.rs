//! Negotiation wire model and the stream descriptor.

use crate::error::{ResolveError, Result};
use crate::persona::Persona;
use bridge_traits::SignatureDecipherer;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// Body of one negotiation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub context: RequestContext,
    pub video_id: String,
    /// Content nonce, fresh per attempt.
    pub cpn: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub client: ClientContext,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext {
    pub client_name: String,
    pub client_version: String,
    pub platform: String,
}

impl PlayerRequest {
    pub fn new(persona: &Persona, track_id: impl Into<String>, cpn: impl Into<String>) -> Self {
        Self {
            context: RequestContext {
                client: ClientContext {
                    client_name: persona.client_name.clone(),
                    client_version: persona.client_version.clone(),
                    platform: persona.platform.clone(),
                },
            },
            video_id: track_id.into(),
            cpn: cpn.into(),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Parsed negotiation response. Every field is optional on the wire; the
/// validity rule below decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingData {
    pub adaptive_formats: Vec<StreamFormat>,
    pub expires_in_seconds: Option<String>,
}

/// One candidate encoded-stream entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamFormat {
    pub itag: Option<u32>,
    pub mime_type: Option<String>,
    pub bitrate: Option<u64>,
    pub content_length: Option<String>,
    /// Direct media URL, when the endpoint handed one out.
    pub url: Option<String>,
    /// Encrypted cipher blob requiring external decipherment.
    pub signature_cipher: Option<String>,
}

impl StreamFormat {
    /// Whether this entry can yield a media URL at all.
    pub fn has_source(&self) -> bool {
        self.url.is_some() || self.signature_cipher.is_some()
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("audio/"))
    }
}

impl PlayerResponse {
    pub fn status(&self) -> Option<&str> {
        self.playability_status.as_ref()?.status.as_deref()
    }

    /// A response is valid only if playability is "OK" and at least one
    /// candidate entry carries a direct URL or a cipher blob.
    pub fn is_valid(&self) -> bool {
        self.status() == Some("OK")
            && self
                .streaming_data
                .as_ref()
                .is_some_and(|data| data.adaptive_formats.iter().any(StreamFormat::has_source))
    }

    /// Attach the persona and nonce that produced this response.
    pub fn into_descriptor(self, persona: impl Into<String>, nonce: impl Into<String>) -> StreamDescriptor {
        StreamDescriptor {
            playability: self.playability_status.unwrap_or_default(),
            formats: self
                .streaming_data
                .map(|data| data.adaptive_formats)
                .unwrap_or_default(),
            persona: persona.into(),
            nonce: nonce.into(),
        }
    }
}

// ============================================================================
// Stream Descriptor
// ============================================================================

/// Result of a successful negotiation.
///
/// Created per playback attempt and discarded once playback starts; nothing
/// caches descriptors across track changes. The persona tag stays attached
/// because decipherment and telemetry both need it.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    pub playability: PlayabilityStatus,
    pub formats: Vec<StreamFormat>,
    /// Name of the persona that produced this descriptor.
    pub persona: String,
    /// Content nonce of the producing attempt.
    pub nonce: String,
}

impl StreamDescriptor {
    pub fn is_valid(&self) -> bool {
        self.playability.status.as_deref() == Some("OK")
            && self.formats.iter().any(StreamFormat::has_source)
    }

    /// Highest-bitrate audio entry with a usable source.
    pub fn best_audio_format(&self) -> Option<&StreamFormat> {
        self.formats
            .iter()
            .filter(|f| f.is_audio() && f.has_source())
            .max_by_key(|f| f.bitrate.unwrap_or(0))
    }

    /// Media URL for the best audio entry, deciphering through the
    /// collaborator when the entry carries a cipher instead of a URL.
    pub async fn playable_url(&self, decipherer: &dyn SignatureDecipherer) -> Result<String> {
        let format = self
            .best_audio_format()
            .ok_or(ResolveError::NoPlayableStream)?;
        self.format_url(format, decipherer).await
    }

    /// Media URL for one specific entry.
    pub async fn format_url(
        &self,
        format: &StreamFormat,
        decipherer: &dyn SignatureDecipherer,
    ) -> Result<String> {
        if let Some(url) = &format.url {
            return Ok(url.clone());
        }
        let cipher = format
            .signature_cipher
            .as_ref()
            .ok_or(ResolveError::NoPlayableStream)?;
        decipherer
            .decipher(cipher, &self.persona)
            .await
            .map_err(|e| ResolveError::Decipher(e.to_string()))
    }
}
