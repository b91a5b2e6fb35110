//! Test utilities and fakes for pacscan unit tests.
//!
//! [`MemoryHandle`] is an in-memory [`Handle`] so the scan can be tested
//! without touching a real package database. The fixtures write the
//! on-disk formats read by the native backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use pacscan::test_support::{MemoryHandle, PkgSpec};
//!
//! let handle = MemoryHandle::new()
//!     .with_local(vec![PkgSpec::new("foo", "1.0-1").provides(&["libfoo"]).build()])
//!     .with_available("core", vec![PkgSpec::new("bar", "2.0-1").provides(&["libfoo"]).build()]);
//! ```

pub mod fixtures;

use std::collections::HashMap;

use crate::core::Package;
use crate::db::{Db, Handle, Repository, SigLevel};
use crate::errors::ScanError;

pub use fixtures::*;

/// In-memory package database handle.
///
/// Repositories added with [`MemoryHandle::with_available`] become visible
/// only once registered, the same way sync databases on disk do.
#[derive(Debug, Default)]
pub struct MemoryHandle {
    local: Repository,
    available: HashMap<String, Repository>,
    sync: Vec<Repository>,
    failing: Vec<String>,
    registrations: Vec<(String, SigLevel)>,
}

impl MemoryHandle {
    /// Create a handle with no installed packages.
    pub fn new() -> Self {
        MemoryHandle {
            local: Repository::new("local"),
            ..Default::default()
        }
    }

    /// Set the installed packages.
    pub fn with_local(mut self, packages: Vec<Package>) -> Self {
        self.local = Repository::with_packages("local", packages);
        self
    }

    /// Make a repository available for registration.
    pub fn with_available(mut self, name: &str, packages: Vec<Package>) -> Self {
        self.available
            .insert(name.to_string(), Repository::with_packages(name, packages));
        self
    }

    /// Register a repository right away.
    pub fn with_sync(mut self, name: &str, packages: Vec<Package>) -> Self {
        self.sync.push(Repository::with_packages(name, packages));
        self
    }

    /// Make registration of `name` fail.
    pub fn failing_registration(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    /// Names and signature levels passed to `register_sync_db`, in order.
    pub fn registrations(&self) -> &[(String, SigLevel)] {
        &self.registrations
    }

    /// Names of the successfully registered repositories.
    pub fn registered_names(&self) -> Vec<String> {
        self.sync.iter().map(|r| r.name().to_string()).collect()
    }
}

impl Handle for MemoryHandle {
    fn register_sync_db(&mut self, name: &str, level: SigLevel) -> Result<(), ScanError> {
        self.registrations.push((name.to_string(), level));

        if name.is_empty() {
            return Err(ScanError::RepositoryRegistration {
                name: name.to_string(),
                reason: "invalid database name".to_string(),
            });
        }

        if self.failing.iter().any(|f| f == name) {
            return Err(ScanError::RepositoryRegistration {
                name: name.to_string(),
                reason: "registration refused".to_string(),
            });
        }

        let repo = self
            .available
            .get(name)
            .cloned()
            .unwrap_or_else(|| Repository::new(name));
        self.sync.push(repo);
        Ok(())
    }

    fn local_db(&self) -> Box<dyn Db + '_> {
        Box::new(&self.local)
    }

    fn sync_dbs(&self) -> Vec<Box<dyn Db + '_>> {
        self.sync
            .iter()
            .map(|repo| Box::new(repo) as Box<dyn Db + '_>)
            .collect()
    }
}
