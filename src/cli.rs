// Command-line surface: clap derive definitions for the two top-level
// commands and the version lookup used by `version`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "refsum",
    about = "Inspect a Polkadot referendum and generate an AI summary of it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with a single referendum interactively.
    Referendum {
        /// Referendum ID to inspect.
        #[arg(long = "ref", value_name = "ID")]
        ref_id: i64,
    },
    /// Print the version of this tool.
    Version,
}

/// The version compiled into the binary, or a dev placeholder when the
/// package metadata is unavailable.
pub fn version_string() -> &'static str {
    version_or_dev(option_env!("CARGO_PKG_VERSION"))
}

fn version_or_dev(version: Option<&str>) -> &str {
    version.unwrap_or("0.0.0-dev")
}
