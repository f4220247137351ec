// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ride models: the untrusted upstream observation and the canonical
//! per-ride document we persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw ride entry from the upstream payload.
///
/// Every field is kept loose on purpose: queue-times.com data is
/// community-sourced and a single malformed ride field must never fail the
/// whole park payload. Type coercion happens during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RideObservation {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub wait_time: Option<Value>,
    #[serde(default)]
    pub is_open: Option<Value>,
    #[serde(default)]
    pub last_updated: Option<Value>,
}

impl RideObservation {
    /// Ride document ID: the upstream id coerced to a string.
    ///
    /// Returns `None` when the id is missing, empty, or of a shape that
    /// cannot identify a document; such rides are skipped entirely.
    pub fn doc_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Stored ride record in Firestore.
///
/// Document path: `parks/{park_id}/rides/{ride_id}`. The document is always
/// overwritten whole; there is no partial-field merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideState {
    /// Ride name/title
    pub name: String,
    /// Current estimated queue duration in minutes (never negative)
    pub wait_time: i64,
    /// Whether the ride is currently operating
    pub is_open: bool,
    /// When the upstream source last updated this ride (ISO 8601)
    pub last_api_update: DateTime<Utc>,
    /// When we normalized this record (ISO 8601)
    pub updated_at: DateTime<Utc>,
}
