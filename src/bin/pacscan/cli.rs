//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use pacscan::db::{DEFAULT_DBPATH, DEFAULT_ROOT};
use pacscan::util::config::DEFAULT_CONFIG_PATH;
use pacscan::util::ColorChoice;
use pacscan::ScanOptions;

/// Report foreign packages whose provided capabilities are now shipped,
/// in a newer version, by a sync repository.
///
/// The exit status is the number of reported packages (capped at 255).
#[derive(Parser)]
#[command(name = "pacscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// pacman configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Installation root
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Package database directory
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DBPATH)]
    pub dbpath: PathBuf,

    /// Color output: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Print one JSON object per candidate instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Paths for the scan.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            config_path: self.config.clone(),
            root: self.root.clone(),
            dbpath: self.dbpath.clone(),
        }
    }
}
