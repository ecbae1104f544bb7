//! Per-group traffic counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Internal group statistics with atomic counters
#[derive(Debug, Default)]
pub(crate) struct GroupStats {
    hits: AtomicU64,
    misses: AtomicU64,
    local_loads: AtomicU64,
    peer_loads: AtomicU64,
    peer_failures: AtomicU64,
}

impl GroupStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_load(&self) {
        self.local_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_load(&self) {
        self.peer_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_failure(&self) {
        self.peer_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn local_loads(&self) -> u64 {
        self.local_loads.load(Ordering::Relaxed)
    }

    pub fn peer_loads(&self) -> u64 {
        self.peer_loads.load(Ordering::Relaxed)
    }

    pub fn peer_failures(&self) -> u64 {
        self.peer_failures.load(Ordering::Relaxed)
    }
}

/// Point-in-time view of a group's traffic and cache occupancy
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GroupStatSnapshot {
    /// Local cache hits
    pub hits: u64,
    /// Local cache misses, counted once per `get`, not per coalesced waiter
    pub misses: u64,
    /// Loads served by the source loader
    pub local_loads: u64,
    /// Loads served by a remote peer
    pub peer_loads: u64,
    /// Peer fetches that failed and fell back to the source loader
    pub peer_failures: u64,
    /// Entries evicted from the local cache
    pub evictions: u64,
    /// Bytes currently held by the local cache
    pub used_bytes: u64,
    /// Entries currently held by the local cache
    pub entries: u64,
}
