// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wait-time sync service.
//!
//! Handles the core workflow, per park:
//! 1. Fetch the current queue-time payload
//! 2. Normalize every ride into a canonical record
//! 3. Diff against the stored snapshot
//! 4. Write only the changed rides, in bounded batches
//!
//! Fleet runs iterate the configured park list and isolate per-park
//! failures so one broken park never aborts the rest.

use crate::db::RideStore;
use crate::error::{AppError, Result};
use crate::models::{FleetSyncResult, ParkFailure, ParkSyncResult, RideObservation, RideState};
use crate::services::queue_times::ParkDataSource;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Placeholder for rides the source did not name.
const UNKNOWN_RIDE_NAME: &str = "Unknown Ride";

/// Firestore caps batch/transaction writes at 500 operations; one commit
/// never carries more ride documents than this.
const MAX_OPS_PER_COMMIT: usize = 500;

/// Synchronizes ride wait times from a park data source into a ride store.
pub struct WaitSyncService<P, S> {
    source: P,
    store: S,
    park_ids: Vec<String>,
}

impl<P: ParkDataSource, S: RideStore> WaitSyncService<P, S> {
    pub fn new(source: P, store: S, park_ids: Vec<String>) -> Self {
        Self {
            source,
            store,
            park_ids,
        }
    }

    /// Synchronize a single park.
    ///
    /// Fetch and store errors propagate to the caller; retry policy belongs
    /// to whatever schedules the sync runs.
    pub async fn sync_park(&self, park_id: &str) -> Result<ParkSyncResult> {
        tracing::info!(park_id, "Fetching park data");

        let data = self.source.fetch_park_data(park_id).await?;

        // One normalization instant for the whole park, so every record
        // written in this run carries the same `updated_at`.
        let now = Utc::now();

        let mut rides: Vec<(String, RideState)> = Vec::new();
        for land in &data.lands {
            for ride in &land.rides {
                let Some(ride_id) = ride.doc_id() else {
                    continue;
                };
                rides.push((ride_id, normalize_ride(ride, now)));
            }
        }
        let processed = rides.len();

        let saved = self.write_changed_rides(park_id, rides).await?;

        tracing::info!(park_id, processed, saved, "Park sync complete");

        Ok(ParkSyncResult {
            park_id: park_id.to_string(),
            updated_rides: processed,
            saved_rides: saved,
            timestamp: utc_now_rfc3339(),
        })
    }

    /// Synchronize every configured park, isolating per-park failures.
    ///
    /// Never fails itself: errors become `failures` entries and the run
    /// continues with the next park. Result and failure lists follow the
    /// configured park order.
    pub async fn sync_all_parks(&self) -> FleetSyncResult {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        let mut total_processed = 0;
        let mut total_saved = 0;

        for park_id in &self.park_ids {
            match self.sync_park(park_id).await {
                Ok(result) => {
                    total_processed += result.updated_rides;
                    total_saved += result.saved_rides;
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!(park_id = %park_id, error = %e, "Park sync failed");
                    failures.push(ParkFailure {
                        park_id: park_id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        FleetSyncResult {
            success: failures.is_empty(),
            total_processed,
            total_saved,
            parks_updated: results.len(),
            parks_failed: failures.len(),
            results,
            failures,
            timestamp: utc_now_rfc3339(),
        }
    }

    /// Write the changed subset of `rides`, in ordered batches.
    ///
    /// Reads the park's stored snapshot once, keeps only rides the change
    /// detector flags, and commits them in chunks within the store's
    /// per-commit operation ceiling. Returns the number of rides written.
    ///
    /// Chunks commit sequentially; a chunk failure propagates immediately
    /// with its index, leaving earlier chunks committed (no rollback).
    async fn write_changed_rides(
        &self,
        park_id: &str,
        rides: Vec<(String, RideState)>,
    ) -> Result<usize> {
        if rides.is_empty() {
            return Ok(0);
        }

        let existing = self.store.load_park_rides(park_id).await?;

        let changed: Vec<(String, RideState)> = rides
            .into_iter()
            .filter(|(ride_id, candidate)| ride_changed(existing.get(ride_id), candidate))
            .collect();

        if changed.is_empty() {
            tracing::debug!(park_id, "No ride changes to write");
            return Ok(0);
        }

        let chunk_count = changed.len().div_ceil(MAX_OPS_PER_COMMIT);
        let mut total_saved = 0;

        for (index, chunk) in changed.chunks(MAX_OPS_PER_COMMIT).enumerate() {
            self.store
                .commit_ride_batch(park_id, chunk)
                .await
                .map_err(|e| {
                    AppError::Database(format!(
                        "Batch {}/{} for park {} failed: {}",
                        index + 1,
                        chunk_count,
                        park_id,
                        e
                    ))
                })?;

            total_saved += chunk.len();
            tracing::debug!(
                park_id,
                batch = index + 1,
                count = chunk.len(),
                "Batch committed"
            );
        }

        Ok(total_saved)
    }
}

/// Normalize one raw observation into the canonical ride record.
///
/// Malformed or missing fields degrade to defaults; nothing here can fail a
/// single ride, let alone a park.
fn normalize_ride(observation: &RideObservation, now: DateTime<Utc>) -> RideState {
    let name = match observation.name.as_ref() {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN_RIDE_NAME.to_string(),
    };

    let wait_time = observation
        .wait_time
        .as_ref()
        .and_then(json_as_i64)
        .unwrap_or(0)
        .max(0);

    let is_open = match observation.is_open.as_ref() {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    };

    let last_api_update = observation
        .last_updated
        .as_ref()
        .and_then(json_as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(now);

    RideState {
        name,
        wait_time,
        is_open,
        last_api_update,
        updated_at: now,
    }
}

/// Decide whether a freshly normalized record needs a write.
///
/// First-seen rides always write. Otherwise only the three observable
/// fields count; `last_api_update` and `updated_at` change every run and
/// must not force a write on their own.
fn ride_changed(existing: Option<&RideState>, candidate: &RideState) -> bool {
    match existing {
        None => true,
        Some(prev) => {
            prev.wait_time != candidate.wait_time
                || prev.is_open != candidate.is_open
                || prev.name != candidate.name
        }
    }
}

/// Numeric JSON value as an integer; floats truncate like an `int()` cast.
fn json_as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

/// Current UTC time as RFC3339 with a `Z` suffix, for result timestamps.
fn utc_now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn observation(value: serde_json::Value) -> RideObservation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_complete_observation() {
        let now = Utc::now();
        let obs = observation(json!({
            "id": 12,
            "name": "Space Mountain",
            "wait_time": 45,
            "is_open": true
        }));

        let state = normalize_ride(&obs, now);

        assert_eq!(state.name, "Space Mountain");
        assert_eq!(state.wait_time, 45);
        assert!(state.is_open);
        // No last_updated in the source: both timestamps are the shared "now".
        assert_eq!(state.last_api_update, now);
        assert_eq!(state.updated_at, now);
    }

    #[test]
    fn test_normalize_malformed_fields_degrade() {
        let now = Utc::now();
        let obs = observation(json!({"id": 13, "wait_time": "closed"}));

        let state = normalize_ride(&obs, now);

        assert_eq!(state.name, "Unknown Ride");
        assert_eq!(state.wait_time, 0);
        assert!(!state.is_open);
        assert_eq!(state.last_api_update, now);
    }

    #[test]
    fn test_normalize_epoch_last_updated() {
        let now = Utc::now();
        let obs = observation(json!({"id": 1, "last_updated": 1700000000}));

        let state = normalize_ride(&obs, now);

        assert_eq!(
            state.last_api_update,
            DateTime::from_timestamp(1700000000, 0).unwrap()
        );
        assert_eq!(state.updated_at, now);
    }

    #[test]
    fn test_normalize_wait_time_coercion() {
        let now = Utc::now();

        let float_wait = normalize_ride(&observation(json!({"id": 1, "wait_time": 45.9})), now);
        assert_eq!(float_wait.wait_time, 45);

        let negative = normalize_ride(&observation(json!({"id": 1, "wait_time": -5})), now);
        assert_eq!(negative.wait_time, 0);
    }

    #[test]
    fn test_normalize_is_open_coercion() {
        let now = Utc::now();

        assert!(normalize_ride(&observation(json!({"id": 1, "is_open": 1})), now).is_open);
        assert!(!normalize_ride(&observation(json!({"id": 1, "is_open": 0})), now).is_open);
        assert!(!normalize_ride(&observation(json!({"id": 1, "is_open": "yes"})), now).is_open);
        assert!(!normalize_ride(&observation(json!({"id": 1})), now).is_open);
    }

    #[test]
    fn test_first_seen_ride_always_changed() {
        let now = Utc::now();
        let candidate = normalize_ride(&observation(json!({"id": 1, "wait_time": 5})), now);

        assert!(ride_changed(None, &candidate));
    }

    #[test]
    fn test_timestamp_drift_alone_is_not_a_change() {
        let obs = json!({"id": 1, "name": "Haunted Mansion", "wait_time": 20, "is_open": true});

        let earlier = Utc::now() - chrono::Duration::minutes(10);
        let previous = normalize_ride(&observation(obs.clone()), earlier);
        let candidate = normalize_ride(&observation(obs), Utc::now());

        assert!(!ride_changed(Some(&previous), &candidate));
    }

    #[test]
    fn test_each_significant_field_triggers_change() {
        let now = Utc::now();
        let base = normalize_ride(
            &observation(json!({"id": 1, "name": "Test Track", "wait_time": 30, "is_open": true})),
            now,
        );

        let mut wait = base.clone();
        wait.wait_time = 35;
        assert!(ride_changed(Some(&base), &wait));

        let mut open = base.clone();
        open.is_open = false;
        assert!(ride_changed(Some(&base), &open));

        let mut name = base.clone();
        name.name = "Test Track (Refurbished)".to_string();
        assert!(ride_changed(Some(&base), &name));
    }
}
