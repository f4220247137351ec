// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use parkwaits::config::Config;
use parkwaits::db::FirestoreDb;
use parkwaits::routes::create_router;
use parkwaits::services::QueueTimesClient;
use parkwaits::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
///
/// The upstream base URL points at an unroutable local port so route tests
/// never touch the network; park fetches fail fast with a fetch error.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config {
        queue_times_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };

    let db = test_db_offline();
    let queue_times = QueueTimesClient::new(
        config.queue_times_base_url.clone(),
        config.fetch_timeout_secs,
    );

    let state = Arc::new(AppState {
        config,
        db,
        queue_times,
    });

    (create_router(state.clone()), state)
}
