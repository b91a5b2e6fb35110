//! Package database access.
//!
//! The scan talks to package databases only through the [`Handle`] and
//! [`Db`] traits. The default backend reads pacman's on-disk formats
//! directly; with the `alpm` feature the same traits are served by libalpm.
//!
//! # Layout
//!
//! ```text
//! /var/lib/pacman/
//! ├── local/
//! │   ├── ALPM_DB_VERSION
//! │   └── foo-1.0-1/
//! │       └── desc           # %NAME%, %VERSION%, %PROVIDES%, ...
//! └── sync/
//!     ├── core.db            # tar(.gz) of <pkg>-<ver>/desc entries
//!     └── extra.db
//! ```

pub mod desc;
#[cfg(feature = "alpm")]
pub mod libalpm;
pub mod native;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{Depend, Package};
use crate::errors::ScanError;

pub use native::NativeHandle;

/// Default installation root.
pub const DEFAULT_ROOT: &str = "/";

/// Default database directory.
pub const DEFAULT_DBPATH: &str = "/var/lib/pacman";

/// Signature verification policy for a sync database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigLevel {
    /// Check the database signature
    pub database: bool,
    /// Accept a database without a signature
    pub database_optional: bool,
}

impl SigLevel {
    /// Verify a database signature when one exists, accept it otherwise.
    pub const PERMISSIVE: SigLevel = SigLevel {
        database: true,
        database_optional: true,
    };
}

impl Default for SigLevel {
    fn default() -> Self {
        SigLevel::PERMISSIVE
    }
}

/// A read-only package database.
pub trait Db {
    /// Get the database name (`local` for the installed-package db).
    fn name(&self) -> &str;

    /// All packages, in database order.
    fn packages(&self) -> Vec<Package>;

    /// Look up a package by exact name.
    fn package(&self, name: &str) -> Option<Package>;

    /// Find a package satisfying a dependency string.
    ///
    /// A package whose own name and version satisfy the string wins over
    /// packages that only provide it.
    fn find_satisfier(&self, depstring: &str) -> Option<Package>;
}

impl<T: Db + ?Sized> Db for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn packages(&self) -> Vec<Package> {
        (**self).packages()
    }

    fn package(&self, name: &str) -> Option<Package> {
        (**self).package(name)
    }

    fn find_satisfier(&self, depstring: &str) -> Option<Package> {
        (**self).find_satisfier(depstring)
    }
}

/// An open package database handle.
///
/// Dropping the handle releases everything it holds.
pub trait Handle {
    /// Register a sync repository. Registration order is query order.
    fn register_sync_db(&mut self, name: &str, level: SigLevel) -> Result<(), ScanError>;

    /// The installed-package database.
    fn local_db(&self) -> Box<dyn Db + '_>;

    /// Registered sync databases, in registration order.
    fn sync_dbs(&self) -> Vec<Box<dyn Db + '_>>;

    /// Compare two versions.
    fn vercmp(&self, a: &str, b: &str) -> Ordering {
        crate::core::vercmp(a, b)
    }
}

/// Open the package database with the compiled-in backend.
pub fn open(root: &Path, dbpath: &Path) -> Result<Box<dyn Handle>, ScanError> {
    #[cfg(feature = "alpm")]
    let handle: Box<dyn Handle> = Box::new(libalpm::AlpmHandle::open(root, dbpath)?);

    #[cfg(not(feature = "alpm"))]
    let handle: Box<dyn Handle> = Box::new(NativeHandle::open(root, dbpath)?);

    Ok(handle)
}

/// An in-memory package database indexed by name.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    name: String,
    packages: Vec<Package>,
    index: HashMap<String, usize>,
}

impl Repository {
    /// Create an empty repository.
    pub fn new(name: impl Into<String>) -> Self {
        Repository {
            name: name.into(),
            packages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a repository holding `packages`, in the given order.
    pub fn with_packages(name: impl Into<String>, packages: Vec<Package>) -> Self {
        let mut repo = Repository::new(name);
        for pkg in packages {
            repo.add(pkg);
        }
        repo
    }

    /// Add a package. A second package with an existing name is ignored.
    pub fn add(&mut self, pkg: Package) -> bool {
        if self.index.contains_key(pkg.name()) {
            tracing::debug!(
                "{}: ignoring duplicate entry for {}",
                self.name,
                pkg.name()
            );
            return false;
        }

        self.index.insert(pkg.name().to_string(), self.packages.len());
        self.packages.push(pkg);
        true
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Db for Repository {
    fn name(&self) -> &str {
        &self.name
    }

    fn packages(&self) -> Vec<Package> {
        self.packages.clone()
    }

    fn package(&self, name: &str) -> Option<Package> {
        self.index.get(name).map(|&idx| self.packages[idx].clone())
    }

    fn find_satisfier(&self, depstring: &str) -> Option<Package> {
        let dep = Depend::parse(depstring);

        self.packages
            .iter()
            .find(|pkg| pkg.satisfies_literally(&dep))
            .or_else(|| {
                self.packages
                    .iter()
                    .find(|pkg| pkg.satisfies_by_provision(&dep))
            })
            .cloned()
    }
}
