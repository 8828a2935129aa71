//! # diskmap-inventory
//!
//! Aggregates per-node disk-discovery reports into a deduplicated,
//! cluster-wide inventory.
//!
//! Every node runs a probe that publishes a [`DiscoveryReport`] listing its
//! block devices. Shared and multipath storage shows up on several nodes
//! under the same World Wide Name, so the interesting questions run in both
//! directions: "which disks does node N see" and "which nodes see disk D".
//! The [`Aggregator`] answers both from a pair of indexes it keeps in
//! lockstep.
//!
//! ## Data flow
//!
//! ```text
//! per-node probes -> DiscoveryReport (one current report per node)
//!   -> Aggregator::ingest      (validate, extract DiskId per device,
//!                               retract old contributions, apply new)
//!   -> Inventory               (node -> [DiskId], DiskId -> {node})
//!   -> disks_for_node / nodes_for_disk / snapshot
//! ```
//!
//! The inventory is a pure function of the current report set: rebuilding
//! from scratch with [`Aggregator::from_reports`] always equals the
//! incrementally maintained state.
//!
//! Single-owner callers use [`Aggregator`] directly (`&mut self` mutation,
//! no locking). Callers feeding reports from one task while serving queries
//! from others use [`SharedAggregator`].
//!
//! [`DiscoveryReport`]: diskmap_core::DiscoveryReport

mod aggregator;
mod inventory;
mod shared;

pub use aggregator::Aggregator;
pub use inventory::Inventory;
pub use shared::SharedAggregator;
