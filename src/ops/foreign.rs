//! Foreign package detection.
//!
//! A package is foreign when no registered sync database has a package of
//! the same name, typically because it was built from the AUR or by hand.

use crate::core::Package;
use crate::db::{Db, Handle};

/// Check if `pkg` is absent from every registered sync database.
pub fn is_foreign(handle: &dyn Handle, pkg: &Package) -> bool {
    is_foreign_in(&handle.sync_dbs(), pkg)
}

/// All foreign installed packages, in local database order.
pub fn find_foreign_packages(handle: &dyn Handle) -> Vec<Package> {
    let sync_dbs = handle.sync_dbs();

    handle
        .local_db()
        .packages()
        .into_iter()
        .filter(|pkg| is_foreign_in(&sync_dbs, pkg))
        .collect()
}

fn is_foreign_in(sync_dbs: &[Box<dyn Db + '_>], pkg: &Package) -> bool {
    match sync_dbs.iter().find(|db| db.package(pkg.name()).is_some()) {
        Some(db) => {
            tracing::trace!("{} found in {}", pkg.name(), db.name());
            false
        }
        None => {
            tracing::debug!("{} {} is foreign", pkg.name(), pkg.version());
            true
        }
    }
}
