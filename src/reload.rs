//! Shared, hot-swappable router handles.
//!
//! A finished [`Router`] is read-only, so request threads can share it
//! without locks. When the routing table must change at runtime (for
//! example after a configuration reload), the whole router is rebuilt and
//! swapped in as an immutable snapshot behind [`arc_swap::ArcSwap`];
//! in-flight requests keep the snapshot they started with and readers
//! never block.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use crate::router::Router;

/// A lock-free handle to the current router snapshot.
pub struct SharedRouter<T> {
    inner: ArcSwap<Router<T>>,
}

impl<T> SharedRouter<T> {
    #[must_use]
    pub fn new(router: Router<T>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(router),
        }
    }

    /// The current snapshot. Cheap enough for once-per-request use.
    #[must_use]
    pub fn load(&self) -> Arc<Router<T>> {
        self.inner.load_full()
    }

    /// Atomically replace the routing table with a freshly built router.
    ///
    /// Readers that already loaded the previous snapshot finish against
    /// it; new loads observe the replacement immediately.
    pub fn replace(&self, router: Router<T>) {
        self.inner.store(Arc::new(router));
        info!("routing table replaced");
    }
}
