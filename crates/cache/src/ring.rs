//! Consistent-hash ring for key-to-peer routing
//!
//! Each real peer is projected onto the ring as `replicas` virtual nodes so
//! that ownership ranges stay balanced even with a small peer set. The ring
//! is built at configuration time and read-only while serving traffic;
//! `add` takes `&mut self` so concurrent rebuilds are rejected by the
//! borrow checker rather than by a lock.

use std::collections::HashMap;
use std::fmt;

/// Virtual-node multiplier used when no explicit value is configured
pub const DEFAULT_REPLICAS: usize = 50;

/// Pluggable ring hash; must be fast and well-distributed, not
/// cryptographic
pub type RingHash = Box<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Maps keys to the registered peer that owns them.
pub struct HashRing {
    replicas: usize,
    hash: RingHash,
    /// Sorted virtual node positions
    ring: Vec<u32>,
    /// Virtual node position to real peer identifier
    owners: HashMap<u32, String>,
}

impl HashRing {
    /// Ring with the default crc32c hash
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, Box::new(|data| crc32c::crc32c(data)))
    }

    pub fn with_hasher(replicas: usize, hash: RingHash) -> Self {
        Self {
            replicas,
            hash,
            ring: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Register peers, projecting each onto `replicas` virtual nodes.
    ///
    /// Adding the same peer twice duplicates its virtual nodes; callers
    /// that need idempotency must track membership themselves.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for peer in peers {
            let peer = peer.into();
            for i in 0..self.replicas {
                let point = (self.hash)(format!("{i}{peer}").as_bytes());
                self.ring.push(point);
                self.owners.insert(point, peer.clone());
            }
        }
        self.ring.sort_unstable();
    }

    /// Peer that owns `key`, or `None` if the ring is empty.
    ///
    /// Ownership is the first virtual node at or clockwise after the key's
    /// hash, wrapping to the smallest node at the top of the ring.
    pub fn owner(&self, key: &str) -> Option<&str> {
        if self.ring.is_empty() {
            return None;
        }
        let hash = (self.hash)(key.as_bytes());
        let idx = self.ring.partition_point(|&point| point < hash);
        let point = self.ring[if idx == self.ring.len() { 0 } else { idx }];
        self.owners.get(&point).map(String::as_str)
    }

    /// Number of virtual nodes on the ring
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICAS)
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.ring.len())
            .finish()
    }
}
