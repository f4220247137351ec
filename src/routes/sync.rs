// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync trigger route.
//!
//! Called by the scheduler (Cloud Scheduler or similar), not by users:
//! `GET /sync?all=true` runs the whole configured fleet, and
//! `GET /sync?park_id=6` runs a single park.

use crate::services::WaitSyncService;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Sync trigger routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sync", get(trigger_sync))
}

/// Recognized query options for the sync trigger.
#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    #[serde(default)]
    all: Option<String>,
    #[serde(default)]
    park_id: Option<String>,
}

/// Which sync to run for a given set of query parameters.
#[derive(Debug, PartialEq)]
enum SyncMode {
    Fleet,
    Park(String),
}

impl SyncMode {
    /// `all=true` wins over `park_id`; no recognized option means a fleet run.
    fn from_query(query: &SyncQuery) -> Self {
        if query
            .all
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return SyncMode::Fleet;
        }

        match &query.park_id {
            Some(id) if !id.is_empty() => SyncMode::Park(id.clone()),
            _ => SyncMode::Fleet,
        }
    }
}

/// Run a sync and serialize its result as the response body.
///
/// Single-park errors surface through `AppError`'s response mapping; a
/// fleet run always produces a body, with the status code derived from its
/// `success` flag so the scheduler sees partial failures.
async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SyncQuery>,
) -> Response {
    let service = WaitSyncService::new(
        state.queue_times.clone(),
        state.db.clone(),
        state.config.park_ids.clone(),
    );

    match SyncMode::from_query(&query) {
        SyncMode::Park(park_id) => match service.sync_park(&park_id).await {
            Ok(result) => Json(result).into_response(),
            Err(e) => e.into_response(),
        },
        SyncMode::Fleet => {
            let result = service.sync_all_parks().await;
            let status = if result.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(result)).into_response()
        }
    }
}
