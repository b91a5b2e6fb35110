//! On-disk fixtures: pacman.conf files, local databases, sync archives.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::{Depend, Package};

/// Description of a test package.
#[derive(Debug, Clone)]
pub struct PkgSpec {
    pub name: String,
    pub version: String,
    pub provides: Vec<String>,
}

impl PkgSpec {
    /// A package with no provisions.
    pub fn new(name: &str, version: &str) -> Self {
        PkgSpec {
            name: name.to_string(),
            version: version.to_string(),
            provides: Vec::new(),
        }
    }

    /// Set the provisions.
    pub fn provides(mut self, provides: &[&str]) -> Self {
        self.provides = provides.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Build the in-memory package.
    pub fn build(&self) -> Package {
        Package::new(self.name.clone(), self.version.clone())
            .with_provides(self.provides.iter().map(|p| Depend::parse(p)).collect())
    }

    /// Render a `desc` record.
    pub fn desc(&self) -> String {
        let mut out = format!(
            "%NAME%\n{}\n\n%VERSION%\n{}\n\n%DESC%\ntest package\n\n",
            self.name, self.version
        );
        if !self.provides.is_empty() {
            out.push_str("%PROVIDES%\n");
            for p in &self.provides {
                out.push_str(p);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Write `contents` as `pacman.conf` in `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("pacman.conf");
    fs::write(&path, contents).unwrap();
    path
}

/// Install a package into `<dbpath>/local`.
pub fn write_local_package(dbpath: &Path, spec: &PkgSpec) {
    let pkg_dir = dbpath.join("local").join(spec.dir_name());
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(pkg_dir.join("desc"), spec.desc()).unwrap();
}

/// Write a gzip-compressed sync database `<dbpath>/sync/<name>.db`.
pub fn write_sync_db(dbpath: &Path, name: &str, packages: &[PkgSpec]) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&sync_archive(packages)).unwrap();
    let bytes = encoder.finish().unwrap();
    write_sync_file(dbpath, name, &bytes)
}

/// Write an uncompressed sync database `<dbpath>/sync/<name>.db`.
pub fn write_sync_db_plain(dbpath: &Path, name: &str, packages: &[PkgSpec]) -> PathBuf {
    write_sync_file(dbpath, name, &sync_archive(packages))
}

fn write_sync_file(dbpath: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let sync_dir = dbpath.join("sync");
    fs::create_dir_all(&sync_dir).unwrap();
    let path = sync_dir.join(format!("{}.db", name));
    fs::write(&path, bytes).unwrap();
    path
}

/// Build a tar archive in sync database layout.
pub fn sync_archive(packages: &[PkgSpec]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    for spec in packages {
        let dir = spec.dir_name();

        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        builder
            .append_data(&mut header, format!("{}/", dir), std::io::empty())
            .unwrap();

        let desc = spec.desc();
        let mut header = tar::Header::new_gnu();
        header.set_size(desc.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, format!("{}/desc", dir), desc.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap()
}
