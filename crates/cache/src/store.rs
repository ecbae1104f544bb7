//! Bounded, mutex-guarded byte store with least-recently-used eviction
//!
//! The store owns the cached entries of one group. All reads and writes go
//! through a single `parking_lot::Mutex`; lookups also promote the entry to
//! most-recently-used, so there is no shared read path. Eviction happens
//! synchronously inside mutating calls, never in a background task.

use crate::byteview::ByteView;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

/// Callback invoked with the key and value of every evicted entry.
///
/// Runs synchronously while the store lock is held; implementations must be
/// fast and must not call back into the store.
pub type EvictHook = Box<dyn Fn(&str, &ByteView) + Send + Sync>;

/// Capacity-bounded key/value store for one cache group.
///
/// An entry's weight is the byte length of its key plus the byte length of
/// its value, which approximates true memory cost without a per-platform
/// size calculation. A `max_bytes` of zero disables eviction entirely.
pub struct ByteStore {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    max_bytes: u64,
    used_bytes: u64,
    evictions: u64,
    entries: LruCache<String, ByteView>,
    evict_hook: Option<EvictHook>,
}

impl ByteStore {
    /// Create a store bounded to `max_bytes` (0 means unbounded)
    pub fn new(max_bytes: u64) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                max_bytes,
                used_bytes: 0,
                evictions: 0,
                entries: LruCache::unbounded(),
                evict_hook: None,
            }),
        }
    }

    /// Create a store that reports every eviction through `hook`
    pub fn with_evict_hook(max_bytes: u64, hook: EvictHook) -> Self {
        let store = Self::new(max_bytes);
        store.inner.lock().evict_hook = Some(hook);
        store
    }

    /// Look up a key, promoting it to most-recently-used on a hit
    pub fn get(&self, key: &str) -> Option<ByteView> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Insert or overwrite an entry, then evict oldest-first until the
    /// store is back under budget
    pub fn add(&self, key: impl Into<String>, value: ByteView) {
        let key = key.into();
        let mut inner = self.inner.lock();
        let added = entry_weight(&key, &value);
        if let Some(previous) = inner.entries.put(key.clone(), value) {
            let replaced = entry_weight(&key, &previous);
            inner.used_bytes = inner.used_bytes - replaced + added;
        } else {
            inner.used_bytes += added;
        }
        inner.evict_to_budget();
    }

    /// Sum of live entry weights
    pub fn used_bytes(&self) -> u64 {
        self.inner.lock().used_bytes
    }

    /// Capacity ceiling (0 means unbounded)
    pub fn max_bytes(&self) -> u64 {
        self.inner.lock().max_bytes
    }

    /// Number of entries evicted over the store's lifetime
    pub fn evictions(&self) -> u64 {
        self.inner.lock().evictions
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

impl StoreInner {
    fn evict_to_budget(&mut self) {
        if self.max_bytes == 0 {
            return;
        }
        while self.used_bytes > self.max_bytes {
            let Some((key, value)) = self.entries.pop_lru() else {
                break;
            };
            self.used_bytes -= entry_weight(&key, &value);
            self.evictions += 1;
            debug!(%key, bytes = value.len(), "evicted least-recently-used entry");
            if let Some(hook) = &self.evict_hook {
                hook(&key, &value);
            }
        }
    }
}

fn entry_weight(key: &str, value: &ByteView) -> u64 {
    (key.len() + value.len()) as u64
}

impl std::fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ByteStore")
            .field("max_bytes", &inner.max_bytes)
            .field("used_bytes", &inner.used_bytes)
            .field("entries", &inner.entries.len())
            .finish()
    }
}
