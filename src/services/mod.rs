// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod queue_times;
pub mod sync;

pub use queue_times::{ParkDataSource, ParkQueueTimes, QueueTimesClient};
pub use sync::WaitSyncService;
