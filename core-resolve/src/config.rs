//! Resolver configuration.

use std::time::Duration;

/// Configuration for [`StreamDescriptorFetcher`](crate::StreamDescriptorFetcher).
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Player endpoint for general-catalog personas.
    pub player_url: String,
    /// Player endpoint for personas that browse the music catalog.
    pub music_player_url: String,
    /// Per-probe request timeout.
    pub request_timeout: Duration,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            player_url: "https://www.youtube.com/youtubei/v1/player".to_string(),
            music_player_url: "https://music.youtube.com/youtubei/v1/player".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ResolveConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.player_url.is_empty() || self.music_player_url.is_empty() {
            return Err("player endpoints must not be empty".to_string());
        }
        if self.request_timeout == Duration::ZERO {
            return Err("request_timeout must be > 0".to_string());
        }
        Ok(())
    }

    /// `scheme://host` of the music player endpoint, sent as `Origin` by
    /// music-client personas.
    pub fn music_origin(&self) -> String {
        origin_of(&self.music_player_url)
    }
}

fn origin_of(url: &str) -> String {
    match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            match rest.find('/') {
                Some(path_start) => url[..scheme_end + 3 + path_start].to_string(),
                None => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolveConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_music_origin() {
        let config = ResolveConfig::default();
        assert_eq!(config.music_origin(), "https://music.youtube.com");

        let config = ResolveConfig {
            music_player_url: "https://host.example".into(),
            ..ResolveConfig::default()
        };
        assert_eq!(config.music_origin(), "https://host.example");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ResolveConfig::default();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = ResolveConfig::default();
        config.player_url = String::new();
        assert!(config.validate().is_err());
    }
}
