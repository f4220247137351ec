// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible local-dev default except nothing: the service
//! can start with an empty environment and sync the default park list
//! against the Firestore emulator.

use std::env;

/// Walt Disney World park IDs on queue-times.com, synced when `PARK_IDS`
/// is not set.
pub const DEFAULT_PARK_IDS: &[&str] = &[
    "5", // EPCOT
    "6", // Magic Kingdom
    "7", // Disney's Hollywood Studios
    "8", // Disney's Animal Kingdom
];

/// Upstream request timeout when `FETCH_TIMEOUT_SECS` is not set.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Base URL of the wait-time API
    pub queue_times_base_url: String,
    /// Bounded wait for one upstream park fetch, in seconds
    pub fetch_timeout_secs: u64,
    /// Ordered list of park IDs to sync
    pub park_ids: Vec<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            queue_times_base_url: "https://queue-times.com".to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            park_ids: DEFAULT_PARK_IDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let park_ids = match env::var("PARK_IDS") {
            Ok(raw) => {
                let ids: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if ids.is_empty() {
                    return Err(ConfigError::Invalid("PARK_IDS"));
                }
                ids
            }
            Err(_) => DEFAULT_PARK_IDS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            queue_times_base_url: env::var("QUEUE_TIMES_BASE_URL")
                .unwrap_or_else(|_| "https://queue-times.com".to_string()),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            park_ids,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
