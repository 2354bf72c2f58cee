use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "catalog-duper")]
#[command(about = "Find catalog items with identical titles and keep only the cheapest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan for duplicate titles and show one page of groups
    Scan {
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Print the page as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete the given items, never the lowest priced item of a group
    DeleteSelected {
        /// Item ids to delete
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Page to show after deleting
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Delete every duplicate, keeping the lowest priced item of each group
    DeleteAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Page to show after deleting
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Load catalog items from a CSV file (id,title,price,categories,created_at,status)
    Import { csv: PathBuf },
    /// List permanently deleted items, newest first
    DeletionLog {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
    /// Print configuration values
    PrintConfig,
}
