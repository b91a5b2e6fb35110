//! Parser for pacman `desc` / `depends` database records.
//!
//! A record is a sequence of blocks. Each block is a `%KEY%` line followed
//! by one value per line and ends at a blank line:
//!
//! ```text
//! %NAME%
//! foo
//!
//! %VERSION%
//! 1.0-1
//!
//! %PROVIDES%
//! libfoo
//! libfoo.so=1-64
//! ```
//!
//! Old sync databases keep `%PROVIDES%` in a separate `depends` file, so
//! several files can be merged into one [`DescRecord`].

use crate::core::{Depend, Package};

/// The fields of a package record the scan cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescRecord {
    pub name: Option<String>,
    pub version: Option<String>,
    pub provides: Vec<String>,
}

impl DescRecord {
    /// Parse one file into a new record.
    pub fn parse(text: &str) -> Self {
        let mut record = DescRecord::default();
        record.merge(text);
        record
    }

    /// Merge the blocks of another file into this record.
    pub fn merge(&mut self, text: &str) {
        let mut key: Option<&str> = None;

        for line in text.lines() {
            let line = line.trim_end();

            if line.is_empty() {
                key = None;
                continue;
            }

            if line.len() > 2 && line.starts_with('%') && line.ends_with('%') {
                key = Some(&line[1..line.len() - 1]);
                continue;
            }

            match key {
                Some("NAME") => self.name = Some(line.to_string()),
                Some("VERSION") => self.version = Some(line.to_string()),
                Some("PROVIDES") => self.provides.push(line.to_string()),
                _ => {}
            }
        }
    }

    /// Build a package, if both name and version are present.
    pub fn into_package(self) -> Option<Package> {
        let name = self.name?;
        let version = self.version?;
        let provides = self.provides.iter().map(|p| Depend::parse(p)).collect();

        Some(Package::new(name, version).with_provides(provides))
    }
}
