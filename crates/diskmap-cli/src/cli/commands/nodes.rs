//! `diskmap nodes` - which disks each node sees.

use anyhow::Result;
use tabled::{Table, Tabled};

use diskmap::Aggregator;

use crate::cli::print_json;
use crate::output::OutputFormat;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "NODE")]
    node: String,
    #[tabled(rename = "DISKS")]
    disks: usize,
    #[tabled(rename = "IDENTITIES")]
    identities: String,
}

pub fn execute(aggregator: &Aggregator, format: OutputFormat) -> Result<()> {
    let snapshot = aggregator.snapshot();

    match format {
        OutputFormat::Json => print_json(&snapshot.node_to_disks),
        OutputFormat::Table => {
            let rows: Vec<NodeRow> = snapshot
                .node_to_disks
                .iter()
                .map(|(node, disks)| NodeRow {
                    node: node.clone(),
                    disks: disks.len(),
                    identities: disks
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
    }
}
