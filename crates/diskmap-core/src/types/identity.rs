use serde::{Deserialize, Serialize};

use crate::error::{DiskmapError, Result};
use crate::types::Device;

/// The key that deduplicates one physical disk across nodes.
///
/// Shared and multipath storage is visible from several nodes under the same
/// World Wide Name, so the WWN is the primary identity. Devices without a WWN
/// (some virtio and loop-backed disks) fall back to their stable udev
/// `device_id`. An identity is never empty: a device with neither field is
/// rejected rather than silently grouped with every other anonymous device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiskId(String);

impl DiskId {
    /// Extract the identity of a discovered device.
    ///
    /// # Errors
    ///
    /// Returns [`DiskmapError::InvalidDevice`] if the device has neither a
    /// WWN nor a device ID.
    pub fn for_device(device: &Device) -> Result<Self> {
        if !device.world_wide_name.is_empty() {
            return Ok(Self(device.world_wide_name.clone()));
        }
        if !device.device_id.is_empty() {
            return Ok(Self(device.device_id.clone()));
        }
        Err(DiskmapError::InvalidDevice {
            path: device.path.clone(),
            reason: "no WWN and no device ID to identify the disk".into(),
        })
    }

    /// The identity as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DiskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DiskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceKind, DeviceState};

    fn device(wwn: &str, device_id: &str) -> Device {
        Device {
            size_bytes: 161_061_273_600,
            path: "/dev/sda".into(),
            filesystem_type: String::new(),
            vendor: String::new(),
            model: "QEMU HARDDISK".into(),
            world_wide_name: wwn.into(),
            device_id: device_id.into(),
            state: DeviceState::Available,
            serial: "seconddisk".into(),
            rotational: true,
            kind: DeviceKind::Disk,
        }
    }

    #[test]
    fn wwn_wins_when_present() {
        let id = DiskId::for_device(&device("0xcafe", "/dev/disk/by-id/x")).unwrap();
        assert_eq!(id.as_str(), "0xcafe");
    }

    #[test]
    fn falls_back_to_device_id() {
        let id = DiskId::for_device(&device("", "/dev/disk/by-id/x")).unwrap();
        assert_eq!(id.as_str(), "/dev/disk/by-id/x");
    }

    #[test]
    fn anonymous_device_is_rejected() {
        let err = DiskId::for_device(&device("", "")).unwrap_err();
        assert!(matches!(err, DiskmapError::InvalidDevice { .. }));
    }
}
