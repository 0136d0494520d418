use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use feedtrack_core::store::StoreConfig;

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// `None` runs against the in-memory store
    pub store: Option<StoreConfig>,
    pub cors_origin: Option<String>,
    pub request_timeout_secs: u64,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = var("FEEDTRACK_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("FEEDTRACK_PORT").unwrap_or_else(|| "8080".to_string());
        let listen_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

        let timeout_secs = match var("FEEDTRACK_STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("Invalid FEEDTRACK_STORE_TIMEOUT_SECS '{}'", raw))?,
            None => 30,
        };

        let store = var("FEEDTRACK_STORE_URL").map(|base_url| {
            let defaults = StoreConfig::default();
            StoreConfig {
                base_url,
                api_key: var("FEEDTRACK_STORE_API_KEY").unwrap_or_default(),
                access_token: var("FEEDTRACK_STORE_ACCESS_TOKEN"),
                targets_table: var("FEEDTRACK_TARGETS_TABLE").unwrap_or(defaults.targets_table),
                orders_table: var("FEEDTRACK_ORDERS_TABLE").unwrap_or(defaults.orders_table),
                orders_subject_column: var("FEEDTRACK_ORDERS_SUBJECT_COLUMN")
                    .unwrap_or(defaults.orders_subject_column),
                timeout_secs,
            }
        });

        Ok(Config {
            listen_addr,
            store,
            cors_origin: var("FEEDTRACK_CORS_ORIGIN"),
            // Outlives the store timeout by a few seconds
            request_timeout_secs: timeout_secs + 5,
        })
    }
}
