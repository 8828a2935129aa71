//! `diskmap disks` - which nodes see each disk (the shared-storage view).

use anyhow::Result;
use tabled::{Table, Tabled};

use diskmap::Aggregator;

use crate::cli::print_json;
use crate::output::OutputFormat;

#[derive(Tabled)]
struct DiskRow {
    #[tabled(rename = "DISK")]
    disk: String,
    #[tabled(rename = "NODES")]
    nodes: usize,
    #[tabled(rename = "SEEN FROM")]
    seen_from: String,
}

pub fn execute(aggregator: &Aggregator, format: OutputFormat) -> Result<()> {
    let snapshot = aggregator.snapshot();

    match format {
        OutputFormat::Json => print_json(&snapshot.disk_to_nodes),
        OutputFormat::Table => {
            let rows: Vec<DiskRow> = snapshot
                .disk_to_nodes
                .iter()
                .map(|(disk, nodes)| DiskRow {
                    disk: disk.to_string(),
                    nodes: nodes.len(),
                    seen_from: nodes.iter().cloned().collect::<Vec<_>>().join(", "),
                })
                .collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
    }
}
