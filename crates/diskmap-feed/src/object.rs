//! Serde mirror of the upstream `LocalVolumeDiscoveryResult` objects.
//!
//! The wire shape is loose: most fields are optional, names follow the
//! upstream JSON (`WWN`, `deviceID`, `fstype`, a nested `status.state`), the
//! rotational flag is a `property` tag and the device class is a lowercase
//! `type` tag. Everything strict lives in `diskmap-core`; conversion
//! validates on the way in.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use diskmap_core::{Device, DeviceKind, DeviceState, DiscoveryReport, Result};

/// One discovery-result object as delivered by the watch feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryResultObject {
    /// Object metadata (name, creation timestamp)
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired-state half: which node this result is for
    pub spec: DiscoverySpec,

    /// Observed-state half: the devices the probe found
    #[serde(default)]
    pub status: DiscoveryStatus,
}

/// Subset of Kubernetes object metadata the aggregator cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    /// Object name; becomes the report ID
    #[serde(default)]
    pub name: String,

    /// Creation timestamp; becomes `observed_at` when present
    #[serde(default, rename = "creationTimestamp")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

/// `spec` block of a discovery result.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySpec {
    /// The reporting node. This is the aggregation key, not the object name.
    #[serde(default, rename = "nodeName")]
    pub node_name: String,
}

/// `status` block of a discovery result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryStatus {
    /// Devices in discovery order; absent means none discovered yet
    #[serde(default, rename = "discoveredDevices")]
    pub discovered_devices: Vec<WireDevice>,
}

/// One device in the upstream JSON shape.
///
/// `size`, `path` and `type` are mandatory on the wire (lsblk always emits
/// them); a device missing one fails the whole object's decode with a
/// [`diskmap_core::DiskmapError::Json`] error rather than a skippable
/// rejection. Everything else defaults when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct WireDevice {
    /// Capacity in bytes
    pub size: u64,

    /// Device node path
    pub path: String,

    /// Filesystem type, empty if raw
    #[serde(default)]
    pub fstype: String,

    /// Hardware vendor
    #[serde(default)]
    pub vendor: String,

    /// Hardware model
    #[serde(default)]
    pub model: String,

    /// World Wide Name
    #[serde(default, rename = "WWN")]
    pub wwn: String,

    /// Stable udev by-id path
    #[serde(default, rename = "deviceID")]
    pub device_id: String,

    /// Nested availability state
    #[serde(default)]
    pub status: WireDeviceStatus,

    /// Serial number
    #[serde(default)]
    pub serial: String,

    /// `Rotational` or `NonRotational`
    #[serde(default)]
    pub property: String,

    /// `disk` or `mpath`
    #[serde(rename = "type")]
    pub kind: WireDeviceKind,
}

/// Nested `status` object of a wire device.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireDeviceStatus {
    /// `Available`, `NotAvailable` or `Unknown`
    #[serde(default)]
    pub state: String,
}

/// Lowercase device class tag from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireDeviceKind {
    /// Plain disk
    Disk,
    /// Device-mapper multipath
    Mpath,
}

impl From<WireDeviceKind> for DeviceKind {
    fn from(kind: WireDeviceKind) -> Self {
        match kind {
            WireDeviceKind::Disk => Self::Disk,
            WireDeviceKind::Mpath => Self::Multipath,
        }
    }
}

impl From<WireDevice> for Device {
    fn from(wire: WireDevice) -> Self {
        Self {
            size_bytes: wire.size,
            path: wire.path,
            filesystem_type: wire.fstype,
            vendor: wire.vendor,
            model: wire.model,
            world_wide_name: wire.wwn,
            device_id: wire.device_id,
            state: parse_state(&wire.status.state),
            serial: wire.serial,
            rotational: wire.property == "Rotational",
            kind: wire.kind.into(),
        }
    }
}

/// Unrecognized states map to `Unknown` rather than failing the object.
fn parse_state(state: &str) -> DeviceState {
    match state {
        "Available" => DeviceState::Available,
        "NotAvailable" => DeviceState::NotAvailable,
        _ => DeviceState::Unknown,
    }
}

impl DiscoveryResultObject {
    /// Convert into a validated [`DiscoveryReport`].
    ///
    /// `observed_at` comes from the object's creation timestamp, falling back
    /// to the current time for objects that never carried one.
    ///
    /// # Errors
    ///
    /// Returns [`diskmap_core::DiskmapError::InvalidReport`] if the object
    /// names no node.
    pub fn into_report(self) -> Result<DiscoveryReport> {
        let report = DiscoveryReport {
            report_id: self.metadata.name,
            node_name: self.spec.node_name,
            observed_at: self.metadata.creation_timestamp.unwrap_or_else(Utc::now),
            devices: self
                .status
                .discovered_devices
                .into_iter()
                .map(Device::from)
                .collect(),
        };
        report.validate()?;
        Ok(report)
    }
}

/// Decode one object or a JSON array of objects.
///
/// # Errors
///
/// Returns [`diskmap_core::DiskmapError::Json`] if the input is neither.
pub fn decode_objects(json: &str) -> Result<Vec<DiscoveryResultObject>> {
    // Many must be tried first: serde-derived structs also deserialize from
    // sequences, so with One first an array would be consumed as a single
    // bogus object (its elements read as the struct's fields in order). A
    // lone JSON object can never deserialize as Vec, so single-object input
    // still falls through to One.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<DiscoveryResultObject>),
        One(Box<DiscoveryResultObject>),
    }

    match serde_json::from_str(json)? {
        OneOrMany::Many(objs) => Ok(objs),
        OneOrMany::One(obj) => Ok(vec![*obj]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "kind": "LocalVolumeDiscoveryResult",
        "apiVersion": "purple.purplestorage.com/v1alpha1",
        "metadata": {
            "name": "discovery-result-ip-10-0-39-204.eu-west-1.compute.internal",
            "creationTimestamp": "2025-03-07T08:47:32Z",
            "namespace": "openshift-operators"
        },
        "spec": { "nodeName": "worker-3" },
        "status": {
            "discoveredDevices": [
                {
                    "size": 161061273600,
                    "path": "/dev/lun2",
                    "fstype": "",
                    "vendor": "",
                    "model": "Amazon Elastic Block Store",
                    "WWN": "0xf00f00df00d",
                    "deviceID": "/dev/disk/by-id/nvme-vol0a3fce28588daea9f",
                    "status": { "state": "Available" },
                    "serial": "vol0a3fce28588daea9f",
                    "property": "NonRotational",
                    "type": "disk"
                }
            ]
        }
    }"#;

    #[test]
    fn decodes_upstream_shape() {
        let objs = decode_objects(SAMPLE).unwrap();
        assert_eq!(objs.len(), 1);

        let report = objs.into_iter().next().unwrap().into_report().unwrap();
        assert_eq!(report.node_name, "worker-3");
        assert_eq!(report.devices.len(), 1);

        let dev = &report.devices[0];
        assert_eq!(dev.world_wide_name, "0xf00f00df00d");
        assert_eq!(dev.size_bytes, 161_061_273_600);
        assert_eq!(dev.state, DeviceState::Available);
        assert!(!dev.rotational);
        assert_eq!(dev.kind, DeviceKind::Disk);
        assert_eq!(
            report.observed_at.to_rfc3339(),
            "2025-03-07T08:47:32+00:00"
        );
    }

    #[test]
    fn missing_devices_means_empty_list() {
        let json = r#"{ "spec": { "nodeName": "worker-0" }, "status": {} }"#;
        let report = decode_objects(json)
            .unwrap()
            .remove(0)
            .into_report()
            .unwrap();
        assert!(report.devices.is_empty());
    }

    #[test]
    fn array_input_decodes_each_object() {
        let json = format!("[{SAMPLE}, {SAMPLE}]");
        let objs = decode_objects(&json).unwrap();
        assert_eq!(objs.len(), 2);
        for obj in &objs {
            assert_eq!(obj.spec.node_name, "worker-3");
            assert_eq!(obj.status.discovered_devices.len(), 1);
        }
    }

    #[test]
    fn two_node_array_aggregates_both_nodes() {
        let json = r#"[
            { "metadata": { "name": "discovery-result-worker-0" },
              "spec": { "nodeName": "worker-0" },
              "status": { "discoveredDevices": [ {
                  "size": 161061273600, "path": "/dev/lun1", "WWN": "0xcafe",
                  "status": { "state": "Available" },
                  "property": "NonRotational", "type": "disk" } ] } },
            { "metadata": { "name": "discovery-result-worker-1" },
              "spec": { "nodeName": "worker-1" },
              "status": { "discoveredDevices": [ {
                  "size": 161061273600, "path": "/dev/lun1", "WWN": "0xcafe",
                  "status": { "state": "Available" },
                  "property": "NonRotational", "type": "disk" } ] } }
        ]"#;

        let reports: Vec<_> = decode_objects(json)
            .unwrap()
            .into_iter()
            .map(|o| o.into_report().unwrap())
            .collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].node_name, "worker-0");
        assert_eq!(reports[1].node_name, "worker-1");
        assert!(reports.iter().all(|r| !r.node_name.is_empty()));
    }

    #[test]
    fn device_missing_required_field_fails_decode_not_rejection() {
        // No "size": the whole object fails decode with a Json error, which
        // is not a skippable rejection.
        let json = r#"{ "spec": { "nodeName": "worker-0" },
            "status": { "discoveredDevices": [ { "path": "/dev/sda", "type": "disk" } ] } }"#;
        let err = decode_objects(json).unwrap_err();
        assert!(!err.is_rejection());
    }

    #[test]
    fn mpath_and_rotational_tags() {
        let json = r#"{
            "spec": { "nodeName": "worker-0" },
            "status": { "discoveredDevices": [ {
                "size": 53687091200,
                "path": "/dev/mapper/mpatha",
                "WWN": "0x5000c50015ea7599",
                "status": { "state": "NotAvailable" },
                "property": "Rotational",
                "type": "mpath"
            } ] }
        }"#;
        let report = decode_objects(json)
            .unwrap()
            .remove(0)
            .into_report()
            .unwrap();
        let dev = &report.devices[0];
        assert!(dev.rotational);
        assert_eq!(dev.kind, DeviceKind::Multipath);
        assert_eq!(dev.state, DeviceState::NotAvailable);
    }

    #[test]
    fn nodeless_object_is_rejected() {
        let json = r#"{ "spec": { "nodeName": "" }, "status": {} }"#;
        let err = decode_objects(json)
            .unwrap()
            .remove(0)
            .into_report()
            .unwrap_err();
        assert!(err.is_rejection());
    }
}
