use std::env;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::constants::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_MS};

#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_override = read_env_first(&["ROSTER_API_URL"]);
        if api_override.is_none() {
            warn!("ROSTER_API_URL not set; defaulting to {}", DEFAULT_API_URL);
        }
        let api_url = api_override.unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout = Duration::from_millis(
            env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        Ok(Self {
            api_url,
            request_timeout,
        })
    }
}

pub(crate) fn read_env_first(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(value) = env::var(key) {
            let trimmed = value.trim().to_string();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
    None
}
