//! TTL snapshot cache over a grid source.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use opsgrid_engine::Grid;

use crate::source::{GridSource, SourceError};

/// Read-through cache: one whole-grid snapshot with a time-to-live.
///
/// Expiry is checked on access, never by a background timer, and the
/// snapshot is replaced wholesale; there is no partial refresh and no
/// invalidation besides the clock. A failed refetch propagates to the
/// caller and leaves the expired slot in place untouched, so an expired
/// grid is never silently served as fresh.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    slot: Option<Slot>,
}

struct Slot {
    grid: Grid,
    taken: Instant,
    taken_at: DateTime<Utc>,
}

impl<S: GridSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: None,
        }
    }

    /// The current snapshot, refetched through the inner source when
    /// missing or older than the TTL.
    pub fn grid(&mut self) -> Result<&Grid, SourceError> {
        if !self.is_fresh() {
            let grid = self.inner.fetch()?;
            self.slot = Some(Slot {
                grid,
                taken: Instant::now(),
                taken_at: Utc::now(),
            });
        }
        // Either the slot was fresh or the fetch above just filled it.
        Ok(&self.slot.as_ref().expect("slot filled").grid)
    }

    fn is_fresh(&self) -> bool {
        self.slot
            .as_ref()
            .map_or(false, |s| s.taken.elapsed() < self.ttl)
    }

    /// When the current snapshot was fetched, if one is held.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|s| s.taken_at)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn describe(&self) -> String {
        self.inner.describe()
    }
}
