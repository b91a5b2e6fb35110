//! Package - one entry of a package database.
//!
//! Packages are Arc-wrapped internally so query results can be handed out
//! by value without copying the provides list.

use std::fmt;
use std::sync::Arc;

use crate::core::Depend;

/// An installed or available package.
#[derive(Clone, PartialEq, Eq)]
pub struct Package {
    inner: Arc<PackageInner>,
}

#[derive(Clone, PartialEq, Eq)]
struct PackageInner {
    name: String,
    version: String,
    provides: Vec<Depend>,
}

impl Package {
    /// Create a package with no provisions.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Package {
            inner: Arc::new(PackageInner {
                name: name.into(),
                version: version.into(),
                provides: Vec::new(),
            }),
        }
    }

    /// Set the provided capabilities.
    pub fn with_provides(mut self, provides: Vec<Depend>) -> Self {
        let inner = Arc::make_mut(&mut self.inner);
        inner.provides = provides;
        self
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the full version string.
    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// Get the provided capabilities.
    pub fn provides(&self) -> &[Depend] {
        &self.inner.provides
    }

    /// Whether the package's own name and version satisfy `dep`.
    pub fn satisfies_literally(&self, dep: &Depend) -> bool {
        self.name() == dep.name() && dep.version_matches(self.version())
    }

    /// Whether one of the package's provisions satisfies `dep`.
    pub fn satisfies_by_provision(&self, dep: &Depend) -> bool {
        self.provides()
            .iter()
            .any(|provision| dep.is_satisfied_by_provision(provision))
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("name", &self.inner.name)
            .field("version", &self.inner.version)
            .field("provides", &self.inner.provides)
            .finish()
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.version())
    }
}
