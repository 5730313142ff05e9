//! Client personas and the frozen persona catalog.

use std::env;

/// One simulated client identity used to query the upstream player endpoint.
///
/// A persona bundles the protocol parameters one client variant presents:
/// name/version pair, platform tag, request-shaping headers, and capability
/// flags. Personas are built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Catalog-unique display name, attached to descriptors and telemetry.
    pub name: String,
    /// Protocol client name sent in the request context.
    pub client_name: String,
    /// Protocol client version sent in the request context.
    pub client_version: String,
    /// Platform tag (`MOBILE`, `DESKTOP`, `TV`).
    pub platform: String,
    /// User agent presented to the endpoint, when this client has one.
    pub user_agent: Option<String>,
    /// API key for this client variant, sourced from the environment.
    pub api_key: Option<String>,
    /// Probes the music-catalog player endpoint instead of the general one.
    pub supports_music_catalog: bool,
    /// Identifies as the dedicated music app (shapes Origin/Referer).
    pub is_music_client: bool,
}

impl Persona {
    /// Mobile-OS client. Most permissive: rarely served degraded data and
    /// rarely asked for proof-of-origin, so it probes first.
    pub fn ios() -> Self {
        Self {
            name: "iOS".to_string(),
            client_name: "IOS".to_string(),
            client_version: "19.45.4".to_string(),
            platform: "MOBILE".to_string(),
            user_agent: None,
            api_key: key_from_env(&["UPSTREAM_API_KEY_IOS", "UPSTREAM_API_KEY_WEB", "UPSTREAM_API_KEY"]),
            supports_music_catalog: false,
            is_music_client: false,
        }
    }

    /// Web music client.
    pub fn web() -> Self {
        Self {
            name: "Web".to_string(),
            client_name: "WEB_REMIX".to_string(),
            client_version: "1.20241127.01.00".to_string(),
            platform: "DESKTOP".to_string(),
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; rv:91.0) Gecko/20100101 Firefox/91.0".to_string(),
            ),
            api_key: key_from_env(&["UPSTREAM_API_KEY_WEB", "UPSTREAM_API_KEY"]),
            supports_music_catalog: true,
            is_music_client: false,
        }
    }

    /// Mobile music-app client.
    pub fn android_music() -> Self {
        Self {
            name: "AndroidMusic".to_string(),
            client_name: "ANDROID_MUSIC".to_string(),
            client_version: "7.27.52".to_string(),
            platform: "MOBILE".to_string(),
            user_agent: None,
            api_key: key_from_env(&[
                "UPSTREAM_API_KEY_ANDROID_MUSIC",
                "UPSTREAM_API_KEY_ANDROID",
                "UPSTREAM_API_KEY_WEB",
                "UPSTREAM_API_KEY",
            ]),
            supports_music_catalog: true,
            is_music_client: true,
        }
    }

    /// Embedded TV client. Least scrutinized surface; last resort.
    pub fn tv() -> Self {
        Self {
            name: "TV".to_string(),
            client_name: "TVHTML5".to_string(),
            client_version: "7.20241201.00.00".to_string(),
            platform: "TV".to_string(),
            user_agent: None,
            api_key: key_from_env(&["UPSTREAM_API_KEY_WEB", "UPSTREAM_API_KEY"]),
            supports_music_catalog: false,
            is_music_client: false,
        }
    }

    /// Persona-specific request headers.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(user_agent) = &self.user_agent {
            headers.push(("User-Agent".to_string(), user_agent.clone()));
        }
        headers
    }
}

/// First non-blank value among the named environment variables.
///
/// Keys are intentionally not compiled in; hosts inject them at startup.
fn key_from_env(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Frozen, ordered collection of personas.
///
/// Constructed once at process start and shared by reference into the
/// fetcher; iteration order is probe priority. The source client tried
/// personas in one fixed order without persisting which one last worked,
/// and that behavior is kept as-is.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Catalog with a caller-supplied persona order.
    pub fn new(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    /// Built-in catalog in production priority order.
    pub fn from_env() -> Self {
        Self::new(vec![
            Persona::ios(),
            Persona::web(),
            Persona::android_music(),
            Persona::tv(),
        ])
    }

    /// Personas in probe priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
