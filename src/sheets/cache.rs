//! Event cache with TTL
//!
//! Holds the raw rows and the computed top 10 of each event tab.
//! - Key: event name
//! - TTL: 5 hours by default, reset on every insert
//! - No capacity bound; expired entries are dropped on read or by `purge_expired`

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

use super::SheetRows;
use crate::ranking::RankedEntry;

/// Default lifetime of a cached event (5 hours)
pub const DEFAULT_TTL_SECS: i64 = 5 * 60 * 60;

/// Cached tab and its ranking
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub full_data: SheetRows,
    pub top10: Vec<RankedEntry>,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: CacheEntry,
    cached_at: DateTime<Utc>,
}

/// In-memory cache of event tabs
pub struct SheetCache {
    slots: Mutex<HashMap<String, Slot>>,
    ttl: Duration,
}

impl SheetCache {
    /// Create a cache whose entries live for `ttl_seconds`
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Get a cached event if it exists and hasn't expired
    pub fn get(&self, event: &str) -> Option<CacheEntry> {
        let mut slots = self.slots.lock();

        if let Some(slot) = slots.get(event) {
            let age = Utc::now() - slot.cached_at;
            if age < self.ttl {
                tracing::trace!(event = event, age_secs = age.num_seconds(), "Cache hit");
                return Some(slot.entry.clone());
            }

            tracing::trace!(event = event, "Cache entry expired");
            slots.remove(event);
        }

        None
    }

    /// Store an event, replacing any previous entry and restarting its TTL
    pub fn insert(&self, event: String, entry: CacheEntry) {
        let slot = Slot {
            entry,
            cached_at: Utc::now(),
        };

        tracing::trace!(event = %event, "Cache insert");
        self.slots.lock().insert(event, slot);
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|_, slot| now - slot.cached_at < self.ttl);
        let removed = before - slots.len();

        if removed > 0 {
            tracing::debug!(removed, remaining = slots.len(), "Purged expired events");
        }

        removed
    }

    /// Number of stored entries, expired ones included until purged
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl Default for SheetCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
