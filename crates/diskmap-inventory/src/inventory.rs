//! The derived inventory: two indexes over the current set of reports.

use std::collections::{BTreeMap, BTreeSet};

use diskmap_core::DiskId;
use serde::{Deserialize, Serialize};

/// Point-in-time projection of the current discovery reports.
///
/// `node_to_disks` keeps each node's identities in discovery order and keeps
/// duplicates (two paths to the same LUN on one node are two entries).
/// `disk_to_nodes` is a set index: a node appears at most once per identity.
///
/// Cross-index invariant: `D ∈ node_to_disks[N]` iff `N ∈ disk_to_nodes[D]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Node name → disk identities in discovery order
    pub node_to_disks: BTreeMap<String, Vec<DiskId>>,

    /// Disk identity → nodes currently reporting it
    pub disk_to_nodes: BTreeMap<DiskId, BTreeSet<String>>,
}

impl Inventory {
    /// Disk identities for a node, in discovery order. Empty if unknown.
    #[must_use]
    pub fn disks_for_node(&self, node_name: &str) -> &[DiskId] {
        self.node_to_disks
            .get(node_name)
            .map_or(&[], Vec::as_slice)
    }

    /// Nodes reporting a disk identity. `None` if unknown.
    #[must_use]
    pub fn nodes_for_disk(&self, identity: &DiskId) -> Option<&BTreeSet<String>> {
        self.disk_to_nodes.get(identity)
    }

    /// Number of distinct disk identities across the cluster
    #[must_use]
    pub fn distinct_disks(&self) -> usize {
        self.disk_to_nodes.len()
    }

    /// Identities visible from more than one node (shared/multipath storage)
    pub fn shared_disks(&self) -> impl Iterator<Item = (&DiskId, &BTreeSet<String>)> + '_ {
        self.disk_to_nodes.iter().filter(|(_, nodes)| nodes.len() > 1)
    }

    /// Record a node's devices in both indexes.
    pub(crate) fn apply(&mut self, node_name: &str, identities: Vec<DiskId>) {
        for id in &identities {
            self.disk_to_nodes
                .entry(id.clone())
                .or_default()
                .insert(node_name.to_string());
        }
        self.node_to_disks.insert(node_name.to_string(), identities);
    }

    /// Remove every contribution a node made to both indexes.
    pub(crate) fn retract(&mut self, node_name: &str) {
        let Some(identities) = self.node_to_disks.remove(node_name) else {
            return;
        };
        for id in identities {
            if let Some(nodes) = self.disk_to_nodes.get_mut(&id) {
                nodes.remove(node_name);
                if nodes.is_empty() {
                    self.disk_to_nodes.remove(&id);
                }
            }
        }
    }

    /// Verify the cross-index invariant in both directions.
    ///
    /// Intended for tests and debug assertions; the mutation paths maintain
    /// the invariant without ever calling this.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        for (node, disks) in &self.node_to_disks {
            for id in disks {
                let listed = self
                    .disk_to_nodes
                    .get(id)
                    .is_some_and(|nodes| nodes.contains(node));
                if !listed {
                    return false;
                }
            }
        }
        for (id, nodes) in &self.disk_to_nodes {
            if nodes.is_empty() {
                return false;
            }
            for node in nodes {
                let listed = self
                    .node_to_disks
                    .get(node)
                    .is_some_and(|disks| disks.contains(id));
                if !listed {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retract_drops_empty_node_sets() {
        let mut inv = Inventory::default();
        inv.apply("worker-0", vec![DiskId::from("0xcafe")]);
        inv.retract("worker-0");
        assert!(inv.disk_to_nodes.is_empty());
        assert!(inv.node_to_disks.is_empty());
        assert!(inv.is_consistent());
    }

    #[test]
    fn duplicate_identities_kept_in_order_once_in_set() {
        let mut inv = Inventory::default();
        inv.apply(
            "worker-0",
            vec![DiskId::from("0xcafe"), DiskId::from("0xcafe")],
        );
        assert_eq!(inv.disks_for_node("worker-0").len(), 2);
        assert_eq!(
            inv.nodes_for_disk(&DiskId::from("0xcafe")).unwrap().len(),
            1
        );
        assert!(inv.is_consistent());
    }

    #[test]
    fn unknown_node_is_empty_slice() {
        let inv = Inventory::default();
        assert!(inv.disks_for_node("worker-9").is_empty());
    }
}
