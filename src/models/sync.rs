// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync run result models.
//!
//! Field names are the service's wire contract with the scheduler that
//! triggers sync runs, so they stay stable even where they read oddly
//! (`updated_rides` counts rides processed, not rides written).

use serde::Serialize;

/// Outcome of synchronizing a single park.
#[derive(Debug, Clone, Serialize)]
pub struct ParkSyncResult {
    /// Park identifier
    pub park_id: String,
    /// Rides observed in the upstream payload (after id filtering)
    pub updated_rides: usize,
    /// Rides whose state changed and was written
    pub saved_rides: usize,
    /// Completion time (ISO 8601 UTC)
    pub timestamp: String,
}

/// One park that failed during a fleet run.
#[derive(Debug, Clone, Serialize)]
pub struct ParkFailure {
    pub park_id: String,
    pub error: String,
}

/// Outcome of synchronizing the whole configured park list.
#[derive(Debug, Clone, Serialize)]
pub struct FleetSyncResult {
    /// True iff no park failed
    pub success: bool,
    /// Total rides processed across succeeding parks
    pub total_processed: usize,
    /// Total rides written across succeeding parks
    pub total_saved: usize,
    /// Count of parks that synced successfully
    pub parks_updated: usize,
    /// Count of parks that failed
    pub parks_failed: usize,
    /// Per-park results, in configured park order
    pub results: Vec<ParkSyncResult>,
    /// Per-park failures, in configured park order
    pub failures: Vec<ParkFailure>,
    /// Completion time (ISO 8601 UTC)
    pub timestamp: String,
}
