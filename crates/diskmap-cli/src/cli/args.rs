//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Cluster disk inventory from discovery-result dumps
///
/// Aggregates per-node LocalVolumeDiscoveryResult JSON into node-centric and
/// disk-centric views. Shared/multipath LUNs show up once, with every node
/// that can reach them.
#[derive(Parser, Debug)]
#[command(name = "diskmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List nodes with the disks each one sees
    Nodes(FilesArgs),

    /// List disk identities with the nodes that see each one
    Disks(FilesArgs),

    /// Print inventory totals
    Summary(FilesArgs),
}

/// Input files shared by every subcommand.
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Discovery-result JSON files (single object or array each)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_disks_with_files() {
        let cli = Cli::parse_from(["diskmap", "disks", "a.json", "b.json"]);
        match cli.command {
            Commands::Disks(args) => assert_eq!(args.files.len(), 2),
            _ => panic!("expected disks subcommand"),
        }
    }

    #[test]
    fn output_flag_is_global() {
        let cli = Cli::parse_from(["diskmap", "nodes", "a.json", "--output", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
