//! diskmap - cluster disk inventory from discovery-result dumps.

use anyhow::Result;

fn main() -> Result<()> {
    diskmap_cli::run()
}
