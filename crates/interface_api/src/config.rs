//! API configuration

use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Origin used when building share links, e.g. `https://food.example`.
    /// When unset, links fall back to the request's Host header over http.
    #[serde(default)]
    pub short_link_base: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "sqlite://recipes.db".to_string(),
            log_level: "info".to_string(),
            short_link_base: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the origin share links are built on, preferring the
    /// configured base over the request host.
    pub fn share_link_origin(&self, request_host: &str) -> String {
        match &self.short_link_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("http://{request_host}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;

    #[test]
    fn share_links_fall_back_to_the_request_host() {
        let config = ApiConfig::default();
        assert_eq!(config.share_link_origin("localhost:8080"), "http://localhost:8080");
    }

    #[test]
    fn configured_base_overrides_the_request_host() {
        let config = ApiConfig {
            short_link_base: Some("https://food.example/".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(config.share_link_origin("localhost:8080"), "https://food.example");
    }
}
