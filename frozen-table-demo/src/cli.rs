use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "frozen-table-demo")]
#[command(about = "Browse rows in a table with a frozen first column", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON array of rows. Uses a built-in sample when omitted.
    #[arg(long)]
    pub rows: Option<PathBuf>,

    /// JSON table configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the platform from the configuration file.
    #[arg(long, value_parser = ["web", "native"])]
    pub platform: Option<String>,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], default_value = "info")]
    pub log_level: String,
}
