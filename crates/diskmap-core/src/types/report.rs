use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DiskmapError, Result};
use crate::types::Device;

/// One node's discovery snapshot at a point in time.
///
/// `node_name` is the aggregation key: a node has at most one current report,
/// and a later report for the same node supersedes the earlier one. The
/// `report_id` only identifies the report object itself (upstream it is the
/// Kubernetes object name) and must never be used to key aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Unique identifier of this report object
    pub report_id: String,

    /// Stable identity of the reporting node
    pub node_name: String,

    /// Logical version of the snapshot; later wins
    pub observed_at: DateTime<Utc>,

    /// Devices in discovery order
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl DiscoveryReport {
    /// Check the report is well-formed enough to aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DiskmapError::InvalidReport`] if `node_name` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.node_name.is_empty() {
            return Err(DiskmapError::invalid_report("empty node name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_node_name_is_invalid() {
        let report = DiscoveryReport {
            report_id: "discovery-result-ip-10-0-13-139".into(),
            node_name: String::new(),
            observed_at: Utc::now(),
            devices: vec![],
        };
        assert!(matches!(
            report.validate(),
            Err(DiskmapError::InvalidReport { .. })
        ));
    }

    #[test]
    fn zero_devices_is_valid() {
        let report = DiscoveryReport {
            report_id: "discovery-result-worker-0".into(),
            node_name: "worker-0".into(),
            observed_at: Utc::now(),
            devices: vec![],
        };
        assert!(report.validate().is_ok());
    }
}
