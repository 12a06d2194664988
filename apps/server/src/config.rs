use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

use kdphub_market_data::provider::frankfurter::{DEFAULT_BASE_URL, MAX_REQUEST_TIMEOUT};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub fx_base_url: String,
    /// Never above the provider's 5 second ceiling.
    pub fx_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("KDP_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid KDP_LISTEN_ADDR")?;
        let cors_allow = std::env::var("KDP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = env_millis("KDP_REQUEST_TIMEOUT_MS", 30_000);
        let fx_base_url =
            std::env::var("KDP_FX_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let fx_timeout_ms = env_millis("KDP_FX_TIMEOUT_MS", 5_000);
        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            fx_base_url,
            fx_timeout: Duration::from_millis(fx_timeout_ms).min(MAX_REQUEST_TIMEOUT),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            fx_base_url: DEFAULT_BASE_URL.to_string(),
            fx_timeout: MAX_REQUEST_TIMEOUT,
        }
    }
}

fn env_millis(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
