// SPDX-License-Identifier: MIT
// Copyright 2026 AutoMeet contributors

//! Application configuration loaded from environment variables.
//!
//! The hosted backend is optional: without `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` the server runs on mock data only and every backend
//! call reports `NotConfigured`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Public Nominatim search endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// User-Agent sent to the geocoder (Nominatim usage policy requires one).
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "auto-event-hub/1.0 (contact: your-email@example.com)";

/// Client sessions idle longer than this are evicted from memory.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin, used for CORS and sign-up email redirects
    pub frontend_url: String,
    /// HS256 key signing the session cookie (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Hosted auth/database base URL
    pub supabase_url: Option<String>,
    /// Public (anon) API key for the hosted backend
    pub supabase_anon_key: Option<String>,
    /// JSON file backing persisted client state; in-memory when unset
    pub storage_path: Option<PathBuf>,
    /// Geocoder search endpoint
    pub geocoder_url: String,
    /// User-Agent sent to the geocoder
    pub geocoder_user_agent: String,
    /// Idle time after which a client session is dropped from memory
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
            supabase_url: non_empty_var("SUPABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: non_empty_var("SUPABASE_ANON_KEY").map(|v| v.trim().to_string()),
            storage_path: non_empty_var("STORAGE_PATH").map(PathBuf::from),
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string()),
            geocoder_user_agent: env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.to_string()),
            session_idle_timeout: Duration::from_secs(
                env::var("SESSION_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_SESSION_IDLE_SECS),
            ),
        })
    }

    /// Config for tests: no backend, in-memory storage.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!".to_vec(),
            supabase_url: None,
            supabase_anon_key: None,
            storage_path: None,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_user_agent: DEFAULT_GEOCODER_USER_AGENT.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }

    /// Whether both backend settings are present.
    pub fn backend_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
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
        env::set_var("SESSION_SIGNING_KEY", "test_session_key_32_bytes_min!!");
        env::set_var("SUPABASE_URL", "https://example.supabase.co/");
        env::set_var("SUPABASE_ANON_KEY", " anon ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.supabase_url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(config.supabase_anon_key.as_deref(), Some("anon"));
        assert!(config.backend_configured());
        assert_eq!(
            config.session_idle_timeout,
            Duration::from_secs(DEFAULT_SESSION_IDLE_SECS)
        );
    }

    #[test]
    fn test_default_has_no_backend() {
        assert!(!Config::test_default().backend_configured());
    }
}
