//! Native backend - reads pacman's database files directly.
//!
//! The local database is a directory per installed package, each holding a
//! `desc` record. A sync database is a tar archive, gzip-compressed or
//! plain, with one `<pkgname>-<pkgver>/desc` entry per package.
//!
//! Signatures are never checked here; every sync database is accepted as
//! if its signature were optional and absent.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

use crate::core::Package;
use crate::db::desc::DescRecord;
use crate::db::{Db, Handle, Repository, SigLevel};
use crate::errors::ScanError;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xb5, 0x2f, 0xfd];
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];

/// A handle over the on-disk databases under one dbpath.
#[derive(Debug)]
pub struct NativeHandle {
    /// Database directory (holds `local/` and `sync/`)
    dbpath: PathBuf,

    /// Installed packages
    local: Repository,

    /// Registered sync databases, in registration order
    sync: Vec<Repository>,
}

impl NativeHandle {
    /// Open the databases under `dbpath` for the installation at `root`.
    ///
    /// Fails if `root` or `<dbpath>/local` is not a readable directory.
    pub fn open(root: &Path, dbpath: &Path) -> Result<Self, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DatabaseInit {
                message: format!("could not find or read directory: {}", root.display()),
            });
        }

        let local_dir = dbpath.join("local");
        if !local_dir.is_dir() {
            return Err(ScanError::DatabaseInit {
                message: format!("could not find or read directory: {}", local_dir.display()),
            });
        }

        let local = load_local(&local_dir).map_err(|e| ScanError::DatabaseInit {
            message: format!("{:#}", e),
        })?;

        tracing::debug!(
            "opened local database {} ({} packages)",
            local_dir.display(),
            local.len()
        );

        Ok(NativeHandle {
            dbpath: dbpath.to_path_buf(),
            local,
            sync: Vec::new(),
        })
    }

    /// Path of the archive backing sync database `name`.
    pub fn sync_db_path(&self, name: &str) -> PathBuf {
        self.dbpath.join("sync").join(format!("{}.db", name))
    }
}

impl Handle for NativeHandle {
    fn register_sync_db(&mut self, name: &str, level: SigLevel) -> Result<(), ScanError> {
        validate_db_name(name).map_err(|reason| ScanError::RepositoryRegistration {
            name: name.to_string(),
            reason,
        })?;

        if self.sync.iter().any(|db| db.name() == name) {
            return Err(ScanError::RepositoryRegistration {
                name: name.to_string(),
                reason: "database already registered".to_string(),
            });
        }

        if level.database && !level.database_optional {
            tracing::warn!("{}: signature verification is not supported, accepting unsigned", name);
        }

        let path = self.sync_db_path(name);
        let repo = match load_sync(name, &path) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::warn!("{}: database unavailable: {:#}", name, e);
                Repository::new(name)
            }
        };

        tracing::debug!("registered sync database {} ({} packages)", name, repo.len());
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

/// Check that `name` can be used as a sync database name.
fn validate_db_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("database name is empty".to_string());
    }
    if name == "local" {
        return Err("`local` is reserved for the installed-package database".to_string());
    }
    if name.contains('/') || name == "." || name == ".." {
        return Err("database name is not a valid file name".to_string());
    }
    Ok(())
}

/// Load the installed-package database from `<dbpath>/local`.
///
/// Entries without a readable, complete `desc` record are skipped.
pub fn load_local(dir: &Path) -> Result<Repository> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;

    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let desc_path = path.join("desc");
        let text = match fs::read(&desc_path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("skipping {}: {}", desc_path.display(), e);
                continue;
            }
        };

        match DescRecord::parse(&text).into_package() {
            Some(pkg) => packages.push(pkg),
            None => tracing::warn!("skipping {}: missing %NAME% or %VERSION%", desc_path.display()),
        }
    }

    Ok(repository_from("local", packages))
}

/// Load a sync database archive.
pub fn load_sync(name: &str, path: &Path) -> Result<Repository> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read database: {}", path.display()))?;

    let packages = read_sync_archive(bytes)
        .with_context(|| format!("failed to read database: {}", path.display()))?;

    Ok(repository_from(name, packages))
}

/// Decode a sync database archive into packages.
pub fn read_sync_archive(bytes: Vec<u8>) -> Result<Vec<Package>> {
    if bytes.starts_with(ZSTD_MAGIC) {
        bail!("zstd-compressed databases are not supported");
    }
    if bytes.starts_with(XZ_MAGIC) {
        bail!("xz-compressed databases are not supported");
    }

    let reader: Box<dyn Read> = if bytes.starts_with(GZIP_MAGIC) {
        Box::new(GzDecoder::new(Cursor::new(bytes)))
    } else {
        Box::new(Cursor::new(bytes))
    };

    let mut archive = Archive::new(reader);
    let mut records: BTreeMap<String, DescRecord> = BTreeMap::new();

    for entry in archive.entries().context("failed to read archive entries")? {
        let mut entry = entry.context("failed to read archive entry")?;

        match entry.header().entry_type() {
            tar::EntryType::Regular | tar::EntryType::Continuous => {}
            _ => continue,
        }

        let entry_path = entry.path().context("failed to get entry path")?;
        let entry_path = entry_path.to_string_lossy().into_owned();
        let Some((dir, file)) = entry_path.rsplit_once('/') else {
            continue;
        };
        if file != "desc" && file != "depends" {
            continue;
        }

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("failed to read archive entry: {}", entry_path))?;

        records
            .entry(dir.to_string())
            .or_default()
            .merge(&String::from_utf8_lossy(&contents));
    }

    let mut packages = Vec::with_capacity(records.len());
    for (dir, record) in records {
        match record.into_package() {
            Some(pkg) => packages.push(pkg),
            None => tracing::debug!("skipping incomplete entry {}", dir),
        }
    }

    Ok(packages)
}

fn repository_from(name: &str, mut packages: Vec<Package>) -> Repository {
    packages.sort_by(|a, b| a.name().cmp(b.name()));
    Repository::with_packages(name, packages)
}
