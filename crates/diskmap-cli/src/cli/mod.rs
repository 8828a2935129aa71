//! CLI entry point and shared command context.

pub mod args;
pub mod commands;

use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::Path;
use tracing::warn;

use diskmap::feed::decode_objects;
use diskmap::Aggregator;

use args::{Cli, Commands};

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("diskmap=debug,diskmap_inventory=debug,diskmap_feed=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Nodes(args) => {
            let agg = load_aggregator(&args.files)?;
            commands::nodes::execute(&agg, cli.output)
        }
        Commands::Disks(args) => {
            let agg = load_aggregator(&args.files)?;
            commands::disks::execute(&agg, cli.output)
        }
        Commands::Summary(args) => {
            let agg = load_aggregator(&args.files)?;
            commands::summary::execute(&agg, cli.output)
        }
    }
}

/// Build an aggregator out of discovery-result dump files.
///
/// Rejected objects (no node name, stale duplicates across files) are logged
/// and skipped so one bad record doesn't sink the whole run.
pub fn load_aggregator(files: &[impl AsRef<Path>]) -> Result<Aggregator> {
    let mut agg = Aggregator::new();

    for file in files {
        let path = file.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let objects = decode_objects(&json)
            .with_context(|| format!("decoding {}", path.display()))?;

        for object in objects {
            let outcome = object.into_report().and_then(|r| agg.ingest(r));
            match outcome {
                Ok(()) => {}
                Err(e) if e.is_rejection() => {
                    warn!(file = %path.display(), error = %e, "skipping discovery result");
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("ingesting {}", path.display()));
                }
            }
        }
    }

    Ok(agg)
}

/// Print a value as pretty JSON (used by every command's JSON path).
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_NODES: &str = r#"[
        {
            "metadata": { "name": "discovery-result-worker-0" },
            "spec": { "nodeName": "worker-0" },
            "status": { "discoveredDevices": [
                { "size": 161061273600, "path": "/dev/lun1", "WWN": "0xcafecafecafe",
                  "deviceID": "/dev/disk/by-id/a", "status": { "state": "Available" },
                  "property": "NonRotational", "type": "disk" },
                { "size": 161061273600, "path": "/dev/lun3", "WWN": "0xdeaddeaddead",
                  "deviceID": "/dev/disk/by-id/b", "status": { "state": "Available" },
                  "property": "NonRotational", "type": "disk" }
            ] }
        },
        {
            "metadata": { "name": "discovery-result-worker-1" },
            "spec": { "nodeName": "worker-1" },
            "status": { "discoveredDevices": [
                { "size": 161061273600, "path": "/dev/lun1", "WWN": "0xcafecafecafe",
                  "deviceID": "/dev/disk/by-id/a", "status": { "state": "Available" },
                  "property": "NonRotational", "type": "disk" }
            ] }
        }
    ]"#;

    #[test]
    fn loads_dump_file_into_aggregator() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_NODES.as_bytes()).unwrap();

        let agg = load_aggregator(&[file.path()]).unwrap();
        assert_eq!(agg.all_nodes().len(), 2);
        assert_eq!(
            agg.nodes_for_disk(&diskmap::DiskId::from("0xcafecafecafe")).len(),
            2
        );
    }

    #[test]
    fn invalid_objects_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "spec": { "nodeName": "" }, "status": {} }"#)
            .unwrap();

        let agg = load_aggregator(&[file.path()]).unwrap();
        assert!(agg.all_nodes().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_aggregator(&["/no/such/file.json"]).is_err());
    }
}
