//! Ring-backed peer selection
//!
//! A [`RingSelector`] combines a [`HashRing`] with the transport handles of
//! the registered peers. The local process participates in the ring under
//! its own identifier; keys that hash to it resolve to `None` so the group
//! loads them locally.

use crate::ring::HashRing;
use crate::traits::{PeerClient, PeerSelector};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// [`PeerSelector`] that routes keys over a consistent-hash ring.
pub struct RingSelector {
    ring: HashRing,
    self_id: String,
    clients: HashMap<String, Arc<dyn PeerClient>>,
}

impl RingSelector {
    /// Create a selector for the process identified by `self_id`, which
    /// joins the ring immediately
    pub fn new(self_id: impl Into<String>, replicas: usize) -> Self {
        let self_id = self_id.into();
        let mut ring = HashRing::new(replicas);
        ring.add([self_id.clone()]);
        Self {
            ring,
            self_id,
            clients: HashMap::new(),
        }
    }

    /// Register a remote peer and its transport handle
    pub fn register(&mut self, peer_id: impl Into<String>, client: Arc<dyn PeerClient>) {
        let peer_id = peer_id.into();
        self.ring.add([peer_id.clone()]);
        self.clients.insert(peer_id, client);
    }
}

impl PeerSelector for RingSelector {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerClient>> {
        let owner = self.ring.owner(key)?;
        if owner == self.self_id {
            return None;
        }
        debug!(%key, %owner, "routing key to remote owner");
        self.clients.get(owner).cloned()
    }
}

impl std::fmt::Debug for RingSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingSelector")
            .field("self_id", &self.self_id)
            .field("peers", &self.clients.len())
            .finish()
    }
}
