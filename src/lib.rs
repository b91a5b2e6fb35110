//! pacscan - find foreign pacman packages that a sync repository now
//! provides in a newer version.
//!
//! A package is foreign when no configured sync repository carries a package
//! of the same name. For each capability a foreign package provides, the
//! first sync package providing it is compared against the installed
//! version, and newer providers are reported.

pub mod core;
pub mod db;
pub mod errors;
pub mod ops;
pub mod util;

/// Test utilities and fakes for pacscan unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides an in-memory database handle and on-disk database fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Depend, Package};
pub use db::{Db, Handle, SigLevel};
pub use errors::ScanError;
pub use ops::{Candidate, ScanOptions};
pub use util::{PacmanConfig, Shell};
