use std::{net::SocketAddr, time::Duration};

use po_classifier_ai::DEFAULT_PROVIDER_ID;
use po_classifier_core::constants::MAX_HISTORY;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub provider_id: String,
    pub model: Option<String>,
    pub provider_url: Option<String>,
    pub backend_timeout: Duration,
    pub history_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("POC_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid POC_LISTEN_ADDR");
        let cors_allow = std::env::var("POC_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("POC_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "60000".into())
            .parse()
            .unwrap_or(60000);
        let provider_id =
            std::env::var("POC_PROVIDER").unwrap_or_else(|_| DEFAULT_PROVIDER_ID.into());
        let model = non_empty_var("POC_MODEL");
        let provider_url = non_empty_var("POC_PROVIDER_URL");
        let backend_timeout_ms: u64 = std::env::var("POC_BACKEND_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let history_capacity: usize = std::env::var("POC_HISTORY_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(MAX_HISTORY);
        Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            provider_id,
            model,
            provider_url,
            backend_timeout: Duration::from_millis(backend_timeout_ms),
            history_capacity,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
