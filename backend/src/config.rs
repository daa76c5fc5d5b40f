//! Runtime configuration read from environment variables.
//!
//! Every value has a default suitable for running the dashboard locally
//! against the production forms API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_BASE_URL: &str = "https://deploy-render-5o3w.onrender.com/api";
const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_SESSION_DB: &str = "rnc_session.sqlite";
const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_LOGO_PATH: &str = "logo_ccs.png";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote forms API, without trailing slash.
    pub api_base_url: String,
    /// Address the dashboard HTTP server listens on.
    pub bind: SocketAddr,
    /// SQLite file backing the session key-value store.
    pub session_db: PathBuf,
    pub fonts_dir: PathBuf,
    /// Logo drawn in the header of generated PDFs; skipped when missing.
    pub logo_path: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_base_url = var("RNC_API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "RNC_API_BASE_URL",
                reason: format!("expected an http(s) URL, got {}", api_base_url),
            });
        }

        let bind = var("RNC_BIND", DEFAULT_BIND)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "RNC_BIND",
                reason: e.to_string(),
            })?;

        let timeout_secs = match lookup("RNC_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "RNC_HTTP_TIMEOUT_SECS",
                    reason: format!("expected a positive number of seconds, got {}", raw),
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            bind,
            session_db: PathBuf::from(var("RNC_SESSION_DB", DEFAULT_SESSION_DB)),
            fonts_dir: PathBuf::from(var("RNC_FONTS_DIR", DEFAULT_FONTS_DIR)),
            logo_path: PathBuf::from(var("RNC_LOGO_PATH", DEFAULT_LOGO_PATH)),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
