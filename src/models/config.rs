//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_page_cache_ttl_secs() -> u64 {
    60
}

fn default_page_cache_max_entries() -> usize {
    512
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signs the flash message cookie; must be at least 64 bytes.
    pub secret: String,
    /// Root of the upstream REST API, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    /// Collection the Q&A list endpoint reads from.
    pub qanda_collection_id: String,
    /// Zero disables page caching.
    #[serde(default = "default_page_cache_ttl_secs")]
    pub page_cache_ttl_secs: u64,
    #[serde(default = "default_page_cache_max_entries")]
    pub page_cache_max_entries: usize,
}

impl ServerConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn page_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.page_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_settings_fall_back_to_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "address": "127.0.0.1",
            "port": 8080,
            "templates_dir": "./templates/**/*",
            "secret": "s",
            "api_base_url": "http://localhost:5000/api",
            "qanda_collection_id": "c1",
        }))
        .unwrap();

        assert_eq!(config.api_timeout(), Duration::from_secs(10));
        assert_eq!(config.page_cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.page_cache_max_entries, 512);
    }
}
