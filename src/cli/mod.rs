pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "awsbreeze")]
#[command(about = "Browse AWS What's New announcements in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Feed URL to read instead of the configured one
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (default: <cache dir>/awsbreeze/awsbreeze.log)
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print the current feed without touching the seen-state
    List {
        /// Only show items from the last N days (0 shows everything)
        #[arg(short, long, default_value_t = 0)]
        days: u32,

        /// Only show new items
        #[arg(short, long)]
        new: bool,
    },
}
