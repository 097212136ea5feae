use std::env;
use tracing::Level;
use tutorcal_core::parse_log_level;

/// Configuration for the booking client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the slot API, without a trailing slash
    pub api_url: String,
    /// Log level for the client binary
    pub log_level: Level,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// `TUTORCAL_API_URL` defaults to `http://localhost:3000`; `LOG_LEVEL`
    /// defaults to `info`.
    pub fn from_env() -> Self {
        let api_url = env::var("TUTORCAL_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        Self::new(api_url, log_level)
    }

    pub fn new(api_url: impl Into<String>, log_level: Level) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { api_url, log_level }
    }
}
