use serde::{Deserialize, Serialize};

/// Availability of a discovered device as reported by the node probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    /// Free for use
    Available,
    /// Present but claimed (mounted, in a volume group, ...)
    NotAvailable,
    /// Probe could not determine availability
    Unknown,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::NotAvailable => write!(f, "NotAvailable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Block device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Plain disk
    Disk,
    /// Device-mapper multipath device
    Multipath,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disk => write!(f, "disk"),
            Self::Multipath => write!(f, "mpath"),
        }
    }
}

/// One raw disk as reported by a node's discovery probe.
///
/// Field semantics follow lsblk output: `path` is the kernel device node and
/// is not stable across reboots; `device_id` is the udev by-id symlink and is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Capacity in bytes
    pub size_bytes: u64,

    /// Device node path, e.g. `/dev/sda`
    pub path: String,

    /// Filesystem type, empty if raw
    #[serde(default)]
    pub filesystem_type: String,

    /// Hardware vendor string
    #[serde(default)]
    pub vendor: String,

    /// Hardware model string
    #[serde(default)]
    pub model: String,

    /// World Wide Name; may be empty for some device classes
    #[serde(default)]
    pub world_wide_name: String,

    /// Stable udev identifier path, e.g. `/dev/disk/by-id/wwn-0x...`
    #[serde(default)]
    pub device_id: String,

    /// Availability state
    #[serde(default)]
    pub state: DeviceState,

    /// Serial number
    #[serde(default)]
    pub serial: String,

    /// Spinning media (from the lsblk ROTA property)
    #[serde(default)]
    pub rotational: bool,

    /// Device class
    pub kind: DeviceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_displays_wire_names() {
        assert_eq!(DeviceState::Available.to_string(), "Available");
        assert_eq!(DeviceState::NotAvailable.to_string(), "NotAvailable");
        assert_eq!(DeviceState::default().to_string(), "Unknown");
    }

    #[test]
    fn kind_displays_lsblk_names() {
        assert_eq!(DeviceKind::Disk.to_string(), "disk");
        assert_eq!(DeviceKind::Multipath.to_string(), "mpath");
    }
}
