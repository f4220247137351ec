// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Ride documents live in a subcollection per park:
//! `parks/{park_id}/rides/{ride_id}`.

use crate::db::{collections, RideStore};
use crate::error::AppError;
use crate::models::RideState;
use std::collections::HashMap;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

impl RideStore for FirestoreDb {
    /// Read the full snapshot of one park's ride documents.
    async fn load_park_rides(
        &self,
        park_id: &str,
    ) -> Result<HashMap<String, RideState>, AppError> {
        let client = self.get_client()?;

        let parent_path = client
            .parent_path(collections::PARKS, park_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let docs = client
            .fluent()
            .select()
            .from(collections::RIDES)
            .parent(&parent_path)
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rides = HashMap::new();
        for doc in docs {
            // Document name is a full resource path; the ride ID is the last segment.
            let ride_id = doc.name.rsplit('/').next().unwrap_or_default().to_string();
            if ride_id.is_empty() {
                continue;
            }

            let state: RideState = firestore::firestore_document_to_serializable(&doc)
                .map_err(|e| AppError::Database(e.to_string()))?;
            rides.insert(ride_id, state);
        }

        tracing::debug!(park_id, count = rides.len(), "Loaded ride snapshot");

        Ok(rides)
    }

    /// Atomically upsert ride documents via a single Firestore transaction.
    async fn commit_ride_batch(
        &self,
        park_id: &str,
        entries: &[(String, RideState)],
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let parent_path = client
            .parent_path(collections::PARKS, park_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for (ride_id, state) in entries {
            client
                .fluent()
                .update()
                .in_col(collections::RIDES)
                .document_id(ride_id)
                .parent(&parent_path)
                .object(state)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add ride {} to transaction: {}",
                        ride_id, e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(())
    }
}
