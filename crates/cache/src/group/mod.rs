//! Cache group orchestration
//!
//! A [`Group`] is a named cache namespace. `get` serves local hits
//! directly; misses run through the single-flight coalescer, where the key
//! is either fetched from the remote peer that owns it or loaded from the
//! caller-supplied source. Values fetched from a peer are returned without
//! populating the local cache, since the owning peer's cache is the
//! authoritative copy; only genuine local loads populate.

pub mod registry;

use crate::byteview::ByteView;
use crate::config::GroupConfig;
use crate::flight::FlightGroup;
use crate::stats::{GroupStatSnapshot, GroupStats};
use crate::store::ByteStore;
use crate::traits::{Loader, PeerClient, PeerSelector};
use meshcache_core::{Error, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

/// A named cache namespace with its own loader, store, and peer
/// configuration. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Group {
    inner: Arc<GroupInner>,
}

struct GroupInner {
    name: String,
    loader: Arc<dyn Loader>,
    store: ByteStore,
    peers: OnceCell<Arc<dyn PeerSelector>>,
    flight: FlightGroup<ByteView>,
    stats: GroupStats,
}

impl Group {
    pub(crate) fn new(
        name: impl Into<String>,
        config: GroupConfig,
        loader: Arc<dyn Loader>,
    ) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                name: name.into(),
                loader,
                store: ByteStore::new(config.max_bytes),
                peers: OnceCell::new(),
                flight: FlightGroup::new(),
                stats: GroupStats::default(),
            }),
        }
    }

    /// Namespace name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Attach the peer selection capability.
    ///
    /// # Panics
    ///
    /// Panics if a selector is already attached; attaching twice is a
    /// wiring mistake, not a runtime condition.
    pub fn attach_peer_selector(&self, selector: Arc<dyn PeerSelector>) {
        if self.inner.peers.set(selector).is_err() {
            panic!(
                "peer selector already attached to group '{}'",
                self.inner.name
            );
        }
    }

    /// Fetch the value for `key`, from the local cache, the owning peer,
    /// or the source loader, in that order.
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(Error::invalid_key(key, "cache keys must be non-empty"));
        }

        if let Some(view) = self.inner.store.get(key) {
            self.inner.stats.record_hit();
            debug!(group = %self.inner.name, %key, "cache hit");
            return Ok(view);
        }

        self.inner.stats.record_miss();
        self.load(key).await
    }

    /// Point-in-time counters for this group
    pub fn stats(&self) -> GroupStatSnapshot {
        let inner = &self.inner;
        GroupStatSnapshot {
            hits: inner.stats.hits(),
            misses: inner.stats.misses(),
            local_loads: inner.stats.local_loads(),
            peer_loads: inner.stats.peer_loads(),
            peer_failures: inner.stats.peer_failures(),
            evictions: inner.store.evictions(),
            used_bytes: inner.store.used_bytes(),
            entries: inner.store.len() as u64,
        }
    }

    /// Coalesced miss path: at most one load per key is in flight at a
    /// time, and every concurrent caller for the key shares its result.
    async fn load(&self, key: &str) -> Result<ByteView> {
        let inner = Arc::clone(&self.inner);
        let lookup = key.to_owned();
        self.inner
            .flight
            .run(key, move || async move {
                if let Some(selector) = inner.peers.get() {
                    if let Some(peer) = selector.pick_peer(&lookup) {
                        match inner.fetch_from_peer(peer.as_ref(), &lookup).await {
                            Ok(view) => {
                                inner.stats.record_peer_load();
                                return Ok(view);
                            }
                            Err(err) => {
                                // best-effort degradation: the local loader
                                // is the fallback, the peer is not retried
                                inner.stats.record_peer_failure();
                                warn!(
                                    group = %inner.name,
                                    key = %lookup,
                                    error = %err,
                                    "peer fetch failed, falling back to local load"
                                );
                            }
                        }
                    }
                }
                inner.load_locally(&lookup).await
            })
            .await
    }
}

impl GroupInner {
    async fn fetch_from_peer(&self, peer: &dyn PeerClient, key: &str) -> Result<ByteView> {
        let bytes = peer
            .fetch(&self.name, key)
            .await
            .map_err(|cause| Error::transport(&self.name, key, cause))?;
        Ok(ByteView::from(bytes))
    }

    async fn load_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = self
            .loader
            .load(key)
            .await
            .map_err(|cause| Error::source_unavailable(&self.name, key, cause))?;
        let view = ByteView::from(bytes);
        self.store.add(key, view.clone());
        self.stats.record_local_load();
        debug!(
            group = %self.name,
            %key,
            bytes = view.len(),
            "loaded from source and populated cache"
        );
        Ok(view)
    }
}

impl std::fmt::Debug for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.inner.name)
            .field("entries", &self.inner.store.len())
            .field("peers_attached", &self.inner.peers.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
