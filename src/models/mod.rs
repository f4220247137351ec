// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod ride;
pub mod sync;

pub use ride::{RideObservation, RideState};
pub use sync::{FleetSyncResult, ParkFailure, ParkSyncResult};
