//! Core types and errors for the diskmap disk-inventory aggregator.
//!
//! This crate provides the foundational types used across the diskmap
//! workspace:
//!
//! - **Types**: [`Device`], [`DiscoveryReport`] and the [`DiskId`] identity
//!   that deduplicates a physical disk across nodes
//! - **Errors**: [`DiskmapError`] and the crate-wide [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use diskmap_core::{DiscoveryReport, DiskId, Result};
//!
//! fn identities(report: &DiscoveryReport) -> Result<Vec<DiskId>> {
//!     report.validate()?;
//!     report.devices.iter().map(DiskId::for_device).collect()
//! }
//! ```

mod error;
pub mod types;

pub use error::{DiskmapError, Result};
pub use types::*;
