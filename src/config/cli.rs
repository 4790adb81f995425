//! Command line interface definition

use crate::types::{ComparisonId, Side};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Byte-positional comparison of binary payloads
#[derive(Debug, Parser)]
#[command(name = "bindiff", version, about)]
pub struct Cli {
    /// Payload store directory [default: .bindiff]
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads for batch comparisons
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// Log filter, e.g. "debug" or "bindiff=trace" (RUST_LOG wins)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload one side of a comparison from a file or base64 text
    #[command(group(ArgGroup::new("source").required(true).args(["file", "base64"])))]
    Put {
        id: ComparisonId,

        #[arg(value_enum)]
        side: Side,

        /// File whose bytes become the payload
        file: Option<PathBuf>,

        /// Payload as standard base64 text
        #[arg(long, value_name = "DATA")]
        base64: Option<String>,
    },

    /// Show sizes, digests and upload times stored under an id
    Show {
        id: ComparisonId,

        /// Include each side's bytes as base64
        #[arg(long)]
        content: bool,
    },

    /// Compare the left and right payloads stored under an id
    Diff { id: ComparisonId },

    /// Compare every stored id on the worker pool
    DiffAll,

    /// Compare two local files directly, bypassing the store
    Compare { left: PathBuf, right: PathBuf },
}

impl Command {
    /// Whether the command reads or writes the payload store
    pub fn uses_store(&self) -> bool {
        !matches!(self, Command::Compare { .. })
    }
}
