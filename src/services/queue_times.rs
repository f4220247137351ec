// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! queue-times.com API client.
//!
//! One endpoint: `GET /parks/{park_id}/queue_times.json`, returning the
//! park's lands with their current ride wait times. The payload is
//! community-sourced, so everything below the `lands` collection is
//! deserialized leniently.

use crate::error::AppError;
use crate::models::RideObservation;
use serde::Deserialize;
use std::time::Duration;

/// Fetch capability consumed by the sync pipeline.
#[allow(async_fn_in_trait)]
pub trait ParkDataSource {
    /// Fetch the current queue-time payload for one park.
    ///
    /// Errors with `Fetch` on transport failure, timeout, or a non-success
    /// status, and with `Validation` when the payload has no usable `lands`
    /// collection.
    async fn fetch_park_data(&self, park_id: &str) -> Result<ParkQueueTimes, AppError>;
}

/// queue-times.com HTTP client.
#[derive(Clone)]
pub struct QueueTimesClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl QueueTimesClient {
    /// Create a new client against the given base URL.
    ///
    /// The timeout bounds each park fetch so one unresponsive upstream park
    /// cannot stall a whole fleet run.
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl ParkDataSource for QueueTimesClient {
    async fn fetch_park_data(&self, park_id: &str) -> Result<ParkQueueTimes, AppError> {
        let url = format!("{}/parks/{}/queue_times.json", self.base_url, park_id);

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Fetch(format!("Request to park {} timed out", park_id))
                } else {
                    AppError::Fetch(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))?;

        parse_park_payload(payload)
    }
}

/// Park payload: lands, each carrying its ride observations.
///
/// The API also reports a top-level `rides` array for uncategorized rides;
/// the sync pipeline only consumes rides grouped under lands.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkQueueTimes {
    #[serde(default)]
    pub lands: Vec<Land>,
}

/// One themed land within a park.
#[derive(Debug, Clone, Deserialize)]
pub struct Land {
    #[serde(default)]
    pub rides: Vec<RideObservation>,
}

/// Validate and deserialize a structurally-successful response body.
///
/// A payload without a non-empty `lands` array is rejected: it means the
/// upstream served something other than park data (an error page, an
/// unknown park) and there is nothing to sync.
fn parse_park_payload(payload: serde_json::Value) -> Result<ParkQueueTimes, AppError> {
    match payload.get("lands") {
        Some(serde_json::Value::Array(lands)) if !lands.is_empty() => {}
        _ => {
            return Err(AppError::Validation(
                "Invalid API response: missing lands".to_string(),
            ))
        }
    }

    serde_json::from_value(payload)
        .map_err(|e| AppError::Validation(format!("Malformed park payload: {}", e)))
}
