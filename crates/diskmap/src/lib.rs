//! Deduplicated cluster-wide disk inventory from per-node discovery reports.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diskmap::{Aggregator, DiskId};
//! use diskmap_feed::decode_objects;
//!
//! fn main() -> diskmap::Result<()> {
//!     let mut aggregator = Aggregator::new();
//!
//!     let json = std::fs::read_to_string("discovery-results.json").unwrap();
//!     for object in decode_objects(&json)? {
//!         aggregator.ingest(object.into_report()?)?;
//!     }
//!
//!     // Which nodes can see this LUN?
//!     let nodes = aggregator.nodes_for_disk(&DiskId::from("0xcafecafecafe"));
//!     println!("{} node(s) share it", nodes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Multi-threaded callers wrap the engine in
//! [`SharedAggregator`] and feed it watch events via [`feed`].

// Re-export core types
pub use diskmap_core::*;

// Re-export the engine
pub use diskmap_inventory::{Aggregator, Inventory, SharedAggregator};

// Re-export the wire/feed layer
pub use diskmap_feed as feed;

// Re-export serialization for convenience
pub use serde;
pub use serde_json;
