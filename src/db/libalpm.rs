//! libalpm backend, enabled with the `alpm` feature.
//!
//! Queries go straight to libalpm; results are copied into [`Package`]
//! values. The underlying `alpm_handle_t` is released when the handle is
//! dropped.

use std::cmp::Ordering;
use std::path::Path;

use alpm::{Alpm, DepMod as AlpmDepMod};

use crate::core::{Depend, Package};
use crate::db::{Db, Handle, SigLevel};
use crate::errors::ScanError;

/// A libalpm-backed handle.
pub struct AlpmHandle {
    alpm: Alpm,
}

impl AlpmHandle {
    /// Initialize libalpm for `root` and `dbpath`.
    pub fn open(root: &Path, dbpath: &Path) -> Result<Self, ScanError> {
        let root = root.to_string_lossy().into_owned();
        let dbpath = dbpath.to_string_lossy().into_owned();

        let alpm = Alpm::new(root, dbpath).map_err(|e| ScanError::DatabaseInit {
            message: e.to_string(),
        })?;

        Ok(AlpmHandle { alpm })
    }
}

impl Handle for AlpmHandle {
    fn register_sync_db(&mut self, name: &str, level: SigLevel) -> Result<(), ScanError> {
        self.alpm
            .register_syncdb(name.to_string(), to_alpm_siglevel(level))
            .map(|_| ())
            .map_err(|e| ScanError::RepositoryRegistration {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    fn local_db(&self) -> Box<dyn Db + '_> {
        Box::new(AlpmDb {
            db: self.alpm.localdb(),
        })
    }

    fn sync_dbs(&self) -> Vec<Box<dyn Db + '_>> {
        self.alpm
            .syncdbs()
            .iter()
            .map(|db| Box::new(AlpmDb { db }) as Box<dyn Db + '_>)
            .collect()
    }

    fn vercmp(&self, a: &str, b: &str) -> Ordering {
        alpm::vercmp(a.to_string(), b.to_string())
    }
}

struct AlpmDb<'h> {
    db: &'h alpm::Db,
}

impl Db for AlpmDb<'_> {
    fn name(&self) -> &str {
        self.db.name()
    }

    fn packages(&self) -> Vec<Package> {
        self.db.pkgs().iter().map(to_package).collect()
    }

    fn package(&self, name: &str) -> Option<Package> {
        self.db.pkg(name.to_string()).ok().map(to_package)
    }

    fn find_satisfier(&self, depstring: &str) -> Option<Package> {
        self.db
            .pkgs()
            .find_satisfier(depstring.to_string())
            .map(to_package)
    }
}

fn to_alpm_siglevel(level: SigLevel) -> alpm::SigLevel {
    let mut flags = alpm::SigLevel::NONE;
    if level.database {
        flags |= alpm::SigLevel::DATABASE;
    }
    if level.database_optional {
        flags |= alpm::SigLevel::DATABASE_OPTIONAL;
    }
    flags
}

fn to_package(pkg: &alpm::Package) -> Package {
    let provides = pkg
        .provides()
        .iter()
        .map(|dep| {
            let op = match dep.depmod() {
                AlpmDepMod::Any => "",
                AlpmDepMod::Eq => "=",
                AlpmDepMod::Ge => ">=",
                AlpmDepMod::Le => "<=",
                AlpmDepMod::Gt => ">",
                AlpmDepMod::Lt => "<",
            };
            match dep.version() {
                Some(version) if !op.is_empty() => {
                    Depend::parse(&format!("{}{}{}", dep.name(), op, version.as_str()))
                }
                _ => Depend::new(dep.name()),
            }
        })
        .collect();

    Package::new(pkg.name(), pkg.version().as_str()).with_provides(provides)
}
