//! Core types for the disk-inventory aggregator.

pub mod device;
pub mod identity;
pub mod report;

pub use device::{Device, DeviceKind, DeviceState};
pub use identity::DiskId;
pub use report::DiscoveryReport;
