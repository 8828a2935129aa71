//! `diskmap summary` - inventory totals.

use anyhow::Result;
use serde::Serialize;
use tabled::{Table, Tabled};

use diskmap::Aggregator;

use crate::cli::print_json;
use crate::output::OutputFormat;

#[derive(Serialize, Tabled)]
struct Summary {
    #[tabled(rename = "NODES")]
    nodes: usize,
    #[tabled(rename = "DISTINCT DISKS")]
    distinct_disks: usize,
    #[tabled(rename = "SHARED DISKS")]
    shared_disks: usize,
}

pub fn execute(aggregator: &Aggregator, format: OutputFormat) -> Result<()> {
    let snapshot = aggregator.snapshot();
    let summary = Summary {
        nodes: aggregator.all_nodes().len(),
        distinct_disks: snapshot.distinct_disks(),
        shared_disks: snapshot.shared_disks().count(),
    };

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Table => {
            println!("{}", Table::new([summary]));
            Ok(())
        }
    }
}
