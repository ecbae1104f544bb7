//! Capability traits at the edges of the cache
//!
//! The group depends on its collaborators only through these traits: the
//! source loader supplied by the cache owner, and the peer selection and
//! peer transport capabilities implemented by whatever wire layer the
//! application wires in.

use async_trait::async_trait;
use meshcache_core::BoxError;
use std::future::Future;
use std::sync::Arc;

/// Fetches raw bytes for a key from the backing data source.
///
/// Called on a local cache miss. Must be safe for concurrent invocation
/// across different keys; the cache guarantees at most one in-flight call
/// per key per process.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, key: &str) -> Result<Vec<u8>, BoxError>;
}

/// Adapter that lets a bare async function act as a [`Loader`].
pub struct LoaderFn<F>(F);

impl<F> LoaderFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> Loader for LoaderFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
{
    async fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        (self.0)(key.to_owned()).await
    }
}

/// Names the remote peer, if any, that owns a key.
///
/// `None` means the local process should load the key itself, either
/// because it owns the key or because no peers are configured.
pub trait PeerSelector: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerClient>>;
}

/// Transport handle for one remote peer.
#[async_trait]
pub trait PeerClient: Send + Sync {
    /// Fetch the value for `key` from the peer's `group` namespace
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>, BoxError>;
}
