//! Application configuration loaded from environment variables.
//!
//! The service key is read once at startup and held in memory; every
//! collaborator client borrows it from here.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend (storage + database)
    pub supabase_url: String,
    /// Service role key used for storage and database calls
    pub supabase_service_key: String,
    /// Storage bucket holding raw GPX uploads
    pub gpx_bucket: String,
    /// Base URL of the reverse-geocoding service
    pub geocoder_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_SERVICE_KEY"))?,
            gpx_bucket: env::var("GPX_BUCKET").unwrap_or_else(|_| "gpx".to_string()),
            geocoder_url: env::var("GEOCODER_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test_service_key".to_string(),
            gpx_bucket: "gpx".to_string(),
            geocoder_url: "http://localhost:8088".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("SUPABASE_URL", "http://localhost:54321/");
        env::set_var("SUPABASE_SERVICE_KEY", " test_key ");

        let config = Config::from_env().expect("Config should load");

        // Trailing slash and whitespace are trimmed
        assert_eq!(config.supabase_url, "http://localhost:54321");
        assert_eq!(config.supabase_service_key, "test_key");
        assert_eq!(config.gpx_bucket, "gpx");
        assert_eq!(config.port, 8080);
    }
}
