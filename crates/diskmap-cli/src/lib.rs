//! # diskmap-cli
//!
//! Command-line inventory views over disk discovery reports.
//!
//! Feed it one or more JSON dumps of `LocalVolumeDiscoveryResult` objects
//! (single object or array per file, e.g. from `kubectl get -o json`) and it
//! aggregates them into the cluster-wide inventory:
//!
//! - `diskmap nodes` - which disks each node sees
//! - `diskmap disks` - which nodes see each disk (the shared-storage view)
//! - `diskmap summary` - totals: nodes, distinct disks, shared disks

pub mod cli;
pub mod output;

pub use cli::run;
