//! The full scan: read the config, open the databases, report candidates.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::db::{self, Handle, DEFAULT_DBPATH, DEFAULT_ROOT};
use crate::errors::ScanError;
use crate::ops::report::{find_candidates, write_report};
use crate::util::config::{PacmanConfig, DEFAULT_CONFIG_PATH};
use crate::util::Shell;

/// Where to find the config and databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// pacman.conf location
    pub config_path: PathBuf,
    /// Installation root
    pub root: PathBuf,
    /// Database directory
    pub dbpath: PathBuf,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            root: PathBuf::from(DEFAULT_ROOT),
            dbpath: PathBuf::from(DEFAULT_DBPATH),
        }
    }
}

/// Open the databases and register the configured repositories.
///
/// The handle is released on every error path by going out of scope.
pub fn init(opts: &ScanOptions) -> Result<Box<dyn Handle>, ScanError> {
    let mut handle = db::open(&opts.root, &opts.dbpath)?;
    let config = PacmanConfig::load(&opts.config_path)?;

    let registered = config.register_repositories(&mut *handle);
    tracing::debug!(
        "registered {} repositories from {}",
        registered,
        opts.config_path.display()
    );

    Ok(handle)
}

/// Report candidates from an initialized handle. Returns the count.
pub fn scan(handle: &dyn Handle, shell: &Shell, out: &mut dyn Write) -> Result<usize> {
    let candidates = find_candidates(handle);
    Ok(write_report(shell, &candidates, out)?)
}

/// Run the whole pass.
pub fn run(opts: &ScanOptions, shell: &Shell, out: &mut dyn Write) -> Result<usize> {
    let handle = init(opts)?;
    scan(&*handle, shell, out)
}

/// Process exit status for `count` reported candidates.
///
/// Saturates so that a large count never wraps around to zero.
pub fn exit_status(count: usize) -> u8 {
    u8::try_from(count).unwrap_or(u8::MAX)
}
