//! Command line of the replay binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tilekit",
    version,
    about = "Replay an editing script against an empty level"
)]
pub struct Cli {
    /// JSON script to replay
    pub script: PathBuf,

    /// Editor config file (.toml or .json); the platform config is used otherwise
    #[arg(long, value_name = "FILE", env = "TILEKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the system clipboard instead of an in-memory one
    #[arg(long)]
    pub system_clipboard: bool,
}
