//! Per-calendar booking locks

use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per `(provider_id, date)`
///
/// Held across "load blocking appointments, check, insert" so two bookings on
/// the same calendar day cannot both pass the conflict check.
#[derive(Debug, Default)]
pub struct CalendarLocks {
    locks: DashMap<(i64, NaiveDate), Arc<Mutex<()>>>,
}

impl CalendarLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, provider_id: i64, date: NaiveDate) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the DashMap shard guard is released before awaiting
        let mutex = self
            .locks
            .entry((provider_id, date))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// Drop locks for past dates that nobody holds
    pub fn prune_before(&self, date: NaiveDate) {
        self.locks.retain(|(_, d), m| *d >= date || Arc::strong_count(m) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
