use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jfs")]
#[command(about = "Journaled in-memory filesystem simulator")]
pub struct Args {
    /// Path to the jfs config directory (defaults to ~/.jfs)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
