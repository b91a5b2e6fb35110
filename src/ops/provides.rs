//! Provider lookup across sync databases.

use crate::core::Package;
use crate::db::{Db, Handle};

/// A package found in a sync database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Name of the database the package came from
    pub repository: String,
    /// The satisfying package
    pub package: Package,
}

/// Find the first sync package satisfying `depstring`.
///
/// Databases are searched in registration order, so the first configured
/// repository with a satisfier wins.
pub fn find_provider(handle: &dyn Handle, depstring: &str) -> Option<Provider> {
    find_provider_in(&handle.sync_dbs(), depstring)
}

pub(crate) fn find_provider_in(sync_dbs: &[Box<dyn Db + '_>], depstring: &str) -> Option<Provider> {
    sync_dbs.iter().find_map(|db| {
        db.find_satisfier(depstring).map(|package| Provider {
            repository: db.name().to_string(),
            package,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryHandle, PkgSpec};

    #[test]
    fn test_first_repository_wins() {
        let handle = MemoryHandle::new()
            .with_sync(
                "core",
                vec![PkgSpec::new("openssl", "3.2-1").provides(&["libssl"]).build()],
            )
            .with_sync(
                "extra",
                vec![PkgSpec::new("libressl", "3.9-1").provides(&["libssl"]).build()],
            );

        let provider = find_provider(&handle, "libssl").unwrap();
        assert_eq!(provider.repository, "core");
        assert_eq!(provider.package.name(), "openssl");
    }

    #[test]
    fn test_falls_through_to_later_repository() {
        let handle = MemoryHandle::new()
            .with_sync("core", vec![PkgSpec::new("bash", "5.2-1").build()])
            .with_sync(
                "extra",
                vec![PkgSpec::new("libressl", "3.9-1").provides(&["libssl"]).build()],
            );

        let provider = find_provider(&handle, "libssl").unwrap();
        assert_eq!(provider.repository, "extra");
    }

    #[test]
    fn test_literal_name_satisfies() {
        let handle = MemoryHandle::new().with_sync("core", vec![PkgSpec::new("zlib", "1.3-1").build()]);

        assert_eq!(find_provider(&handle, "zlib").unwrap().package.name(), "zlib");
        assert!(find_provider(&handle, "zlib>=2").is_none());
    }

    #[test]
    fn test_no_match() {
        let handle = MemoryHandle::new().with_sync("core", vec![PkgSpec::new("zlib", "1.3-1").build()]);
        assert!(find_provider(&handle, "libfoo").is_none());

        let empty = MemoryHandle::new();
        assert!(find_provider(&empty, "zlib").is_none());
    }
}
