//! Thread-safe handle around the aggregator.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use diskmap_core::{DiscoveryReport, DiskId, Result};

use crate::aggregator::Aggregator;
use crate::inventory::Inventory;

/// Clone-able, thread-safe handle to an [`Aggregator`].
///
/// Mutations take the write lock, so the multi-step index update inside
/// `ingest`/`remove` is atomic to readers; queries take the read lock and may
/// run concurrently with each other. Intended usage is rare writes (periodic
/// node reports) against frequent reads (UI or API queries).
#[derive(Debug, Clone, Default)]
pub struct SharedAggregator {
    inner: Arc<RwLock<Aggregator>>,
}

impl SharedAggregator {
    /// Wrap a fresh, empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing aggregator (e.g. one rebuilt from stored reports)
    #[must_use]
    pub fn from_aggregator(aggregator: Aggregator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(aggregator)),
        }
    }

    /// See [`Aggregator::ingest`]
    pub fn ingest(&self, report: DiscoveryReport) -> Result<()> {
        self.write().ingest(report)
    }

    /// See [`Aggregator::remove`]
    pub fn remove(&self, node_name: &str) {
        self.write().remove(node_name);
    }

    /// See [`Aggregator::disks_for_node`]; returns an owned list
    #[must_use]
    pub fn disks_for_node(&self, node_name: &str) -> Vec<DiskId> {
        self.read().disks_for_node(node_name).to_vec()
    }

    /// See [`Aggregator::nodes_for_disk`]
    #[must_use]
    pub fn nodes_for_disk(&self, identity: &DiskId) -> BTreeSet<String> {
        self.read().nodes_for_disk(identity)
    }

    /// See [`Aggregator::all_nodes`]
    #[must_use]
    pub fn all_nodes(&self) -> BTreeSet<String> {
        self.read().all_nodes()
    }

    /// See [`Aggregator::snapshot`]
    #[must_use]
    pub fn snapshot(&self) -> Inventory {
        self.read().snapshot()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Aggregator> {
        // Lock poisoning only happens if a writer panicked; the inventory is
        // never left half-updated because mutation methods don't panic
        // between index writes. Propagating the poison would just convert
        // one panic into many.
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Aggregator> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
