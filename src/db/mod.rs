// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use crate::models::RideState;
use std::collections::HashMap;

/// Collection names as constants.
pub mod collections {
    pub const PARKS: &str = "parks";
    /// Subcollection of a park document
    pub const RIDES: &str = "rides";
}

/// Document-store capability the sync pipeline consumes.
///
/// Two operations only: a full snapshot read of one park's ride documents,
/// and an atomic multi-document upsert. Callers are responsible for keeping
/// a single commit within the store's per-call operation ceiling.
#[allow(async_fn_in_trait)]
pub trait RideStore {
    /// Read every ride document currently stored for a park, keyed by ride ID.
    async fn load_park_rides(
        &self,
        park_id: &str,
    ) -> Result<HashMap<String, RideState>, AppError>;

    /// Atomically upsert a set of ride documents for a park.
    ///
    /// Full-document overwrite semantics: each entry replaces whatever is
    /// stored at `parks/{park_id}/rides/{ride_id}`.
    async fn commit_ride_batch(
        &self,
        park_id: &str,
        entries: &[(String, RideState)],
    ) -> Result<(), AppError>;
}
