//! The aggregation engine: current reports plus derived indexes.

use std::collections::{BTreeMap, BTreeSet};

use diskmap_core::{DiscoveryReport, DiskId, DiskmapError, Result};
use tracing::debug;

use crate::inventory::Inventory;

/// Aggregates per-node discovery reports into a cluster-wide disk inventory.
///
/// The aggregator holds the current report per node and keeps the derived
/// [`Inventory`] in lockstep with it. At any instant the inventory equals
/// what [`Aggregator::from_reports`] would rebuild from the stored reports.
///
/// Ordering policy: a report whose `observed_at` is strictly older than the
/// held report for the same node is rejected with
/// [`DiskmapError::StaleReport`]; equal-or-newer replaces. Re-delivering the
/// identical report is therefore an accepted no-op.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    reports: BTreeMap<String, DiscoveryReport>,
    inventory: Inventory,
}

impl Aggregator {
    /// Create an empty aggregator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an aggregator from scratch out of a set of reports.
    ///
    /// # Errors
    ///
    /// Fails on the first report that [`Aggregator::ingest`] would reject.
    pub fn from_reports<I>(reports: I) -> Result<Self>
    where
        I: IntoIterator<Item = DiscoveryReport>,
    {
        let mut agg = Self::new();
        for report in reports {
            agg.ingest(report)?;
        }
        Ok(agg)
    }

    /// Ingest a node's report, superseding any held report for that node.
    ///
    /// Identity extraction runs for every device before anything is touched,
    /// so a rejected report leaves the node's prior state intact. The
    /// retract-then-apply step is O(old devices + new devices).
    ///
    /// # Errors
    ///
    /// - [`DiskmapError::InvalidReport`] if the node name is empty
    /// - [`DiskmapError::InvalidDevice`] if any device has no usable identity
    /// - [`DiskmapError::StaleReport`] if an older report is already held
    pub fn ingest(&mut self, report: DiscoveryReport) -> Result<()> {
        report.validate()?;

        if let Some(held) = self.reports.get(&report.node_name) {
            if report.observed_at < held.observed_at {
                return Err(DiskmapError::StaleReport {
                    node: report.node_name,
                    held: held.observed_at,
                    offered: report.observed_at,
                });
            }
        }

        // All-or-nothing: extract every identity before mutating.
        let identities = report
            .devices
            .iter()
            .map(DiskId::for_device)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            node = %report.node_name,
            report = %report.report_id,
            devices = identities.len(),
            "ingesting discovery report"
        );

        self.inventory.retract(&report.node_name);
        self.inventory.apply(&report.node_name, identities);
        self.reports.insert(report.node_name.clone(), report);
        Ok(())
    }

    /// Remove a node's report and all its index contributions.
    ///
    /// No-op if the node holds no report.
    pub fn remove(&mut self, node_name: &str) {
        if self.reports.remove(node_name).is_none() {
            return;
        }
        debug!(node = node_name, "removing node from inventory");
        self.inventory.retract(node_name);
    }

    /// Disk identities reported by a node, in discovery order.
    ///
    /// Empty if the node is unknown or reported zero devices.
    #[must_use]
    pub fn disks_for_node(&self, node_name: &str) -> &[DiskId] {
        self.inventory.disks_for_node(node_name)
    }

    /// Nodes currently reporting a disk identity. Empty if unknown.
    #[must_use]
    pub fn nodes_for_disk(&self, identity: &DiskId) -> BTreeSet<String> {
        self.inventory
            .nodes_for_disk(identity)
            .cloned()
            .unwrap_or_default()
    }

    /// Nodes currently holding a report
    #[must_use]
    pub fn all_nodes(&self) -> BTreeSet<String> {
        self.reports.keys().cloned().collect()
    }

    /// The report currently held for a node, if any
    #[must_use]
    pub fn report_for_node(&self, node_name: &str) -> Option<&DiscoveryReport> {
        self.reports.get(node_name)
    }

    /// Owned point-in-time copy of the inventory, safe against later mutation
    #[must_use]
    pub fn snapshot(&self) -> Inventory {
        self.inventory.clone()
    }

    /// Borrow the live inventory
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}
