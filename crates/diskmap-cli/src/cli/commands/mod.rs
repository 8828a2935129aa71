//! Command implementations.

pub mod disks;
pub mod nodes;
pub mod summary;
