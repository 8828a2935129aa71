//! Wire-format decoding and watch-event feed for the diskmap aggregator.
//!
//! Upstream, discovery results are Kubernetes custom resources
//! (`LocalVolumeDiscoveryResult`): one object per node, `spec.nodeName`
//! naming the reporter and `status.discoveredDevices` listing what its probe
//! found. This crate owns the loose wire shape, converts it into the strict
//! [`diskmap_core::DiscoveryReport`], and applies watch events to a
//! [`diskmap_inventory::SharedAggregator`]. The transport that produces the
//! events (watch connection, poll loop, files) stays outside.

mod event;
mod object;

pub use event::{apply_event, run, WatchEvent};
pub use object::{
    decode_objects, DiscoveryResultObject, DiscoverySpec, DiscoveryStatus, ObjectMeta, WireDevice,
    WireDeviceKind, WireDeviceStatus,
};
