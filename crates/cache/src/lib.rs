//! Distributed read-through in-process cache
//!
//! A process holds a bounded local cache per named namespace (a [`Group`]).
//! On a miss the group either fetches the value from the peer process that
//! owns the key, selected by consistent hashing over the cluster view, or
//! falls back to the caller-supplied source loader, then populates its own
//! cache. Concurrent misses for the same key are coalesced so the backing
//! data source sees at most one load per key per process at a time.
//!
//! Main pieces:
//! - [`ByteView`]: immutable holder of a cached value's bytes
//! - [`ByteStore`]: bounded, mutex-guarded LRU store
//! - [`HashRing`]: consistent-hash ring with virtual nodes
//! - [`FlightGroup`]: single-flight request coalescer
//! - [`Group`] / [`GroupRegistry`]: the read-through orchestrator and its
//!   per-application registry

pub mod byteview;
pub mod config;
pub mod flight;
pub mod group;
pub mod ring;
pub mod selector;
pub mod stats;
pub mod store;
pub mod traits;

pub use byteview::ByteView;
pub use config::GroupConfig;
pub use flight::FlightGroup;
pub use group::{registry::GroupRegistry, Group};
pub use ring::{HashRing, RingHash, DEFAULT_REPLICAS};
pub use selector::RingSelector;
pub use stats::GroupStatSnapshot;
pub use store::{ByteStore, EvictHook};
pub use traits::{Loader, LoaderFn, PeerClient, PeerSelector};

pub use meshcache_core::{BoxError, Error, Result};
