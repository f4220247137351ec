// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parkwaits: keep theme-park ride wait times fresh in Firestore
//!
//! This crate provides the backend service that pulls current queue times
//! from queue-times.com and persists per-ride state, writing only rides
//! whose observable state changed since the last run.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::QueueTimesClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub queue_times: QueueTimesClient,
}
