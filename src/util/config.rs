//! pacman.conf reader.
//!
//! Only the section structure matters to the scan: every section other than
//! `[options]` names a sync repository. `key = value` lines are skipped.
//!
//! ```ini
//! [options]
//! HoldPkg = pacman glibc   # inline comments are stripped
//!
//! [core]
//! Include = /etc/pacman.d/mirrorlist
//! ```

use std::path::Path;

use crate::db::{Handle, SigLevel};
use crate::errors::ScanError;

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pacman.conf";

/// Name of the section holding global options.
pub const OPTIONS_SECTION: &str = "options";

/// A parsed pacman.conf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacmanConfig {
    sections: Vec<Section>,
}

/// One `[name]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name without brackets
    pub name: String,

    /// 1-based line number of the header
    pub line: usize,
}

impl Section {
    /// Whether this section names a sync repository.
    pub fn is_repository(&self) -> bool {
        self.name != OPTIONS_SECTION
    }
}

impl PacmanConfig {
    /// Read and parse a config file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let bytes = std::fs::read(path).map_err(|source| ScanError::ConfigOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Parse config text.
    ///
    /// An inline comment is cut at the first `#` and what is left is trimmed
    /// again, so `[extra] # note` still opens `[extra]`. A header without its
    /// closing `]` is skipped. An empty `[]` is kept as a section named `""`,
    /// which no database accepts, so registration stops there.
    pub fn parse(contents: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for (idx, raw) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.split_once('#').map_or(line, |(before, _)| before).trim();

            if !line.starts_with('[') {
                continue;
            }

            match section_name(line) {
                Some(name) => sections.push(Section {
                    name: name.to_string(),
                    line: line_no,
                }),
                None => tracing::debug!("line {}: ignoring malformed section `{}`", line_no, line),
            }
        }

        PacmanConfig { sections }
    }

    /// All sections, in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Repository sections, in file order.
    pub fn repositories(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_repository())
    }

    /// Names of the repository sections, in file order.
    pub fn repository_names(&self) -> Vec<&str> {
        self.repositories().map(|s| s.name.as_str()).collect()
    }

    /// Register every repository section with `handle`, in file order.
    ///
    /// Stops at the first registration failure. Repositories registered
    /// before it remain registered. Returns how many were registered.
    pub fn register_repositories(&self, handle: &mut dyn Handle) -> usize {
        let mut registered = 0;

        for section in self.repositories() {
            if let Err(e) = handle.register_sync_db(&section.name, SigLevel::PERMISSIVE) {
                tracing::warn!("{} (line {}); ignoring remaining repositories", e, section.line);
                break;
            }
            registered += 1;
        }

        registered
    }
}

/// Extract the name from a `[name]` header. Returns `None` if the closing
/// bracket is missing.
fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_config, MemoryHandle};
    use tempfile::TempDir;

    const PACMAN_CONF: &str = "\
#
# /etc/pacman.conf
#
[options]
HoldPkg     = pacman glibc
Architecture = auto
CheckSpace
SigLevel    = Required DatabaseOptional

#[testing]
#Include = /etc/pacman.d/mirrorlist

[core]
Include = /etc/pacman.d/mirrorlist

[extra] # main repo
Include = /etc/pacman.d/mirrorlist

   [multilib]
Include = /etc/pacman.d/mirrorlist
";

    #[test]
    fn test_parse_sections() {
        let config = PacmanConfig::parse(PACMAN_CONF);
        let names: Vec<_> = config.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["options", "core", "extra", "multilib"]);
        assert_eq!(config.repository_names(), vec!["core", "extra", "multilib"]);
    }

    #[test]
    fn test_header_lines() {
        let config = PacmanConfig::parse(PACMAN_CONF);
        let lines: Vec<_> = config.sections().iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![4, 13, 16, 19]);
    }

    #[test]
    fn test_inline_comment_after_header() {
        let config = PacmanConfig::parse("[core]# main\n[extra]   # second\n");
        assert_eq!(config.repository_names(), vec!["core", "extra"]);
    }

    #[test]
    fn test_malformed_section_skipped() {
        let config = PacmanConfig::parse("[core\nInclude = x\n[extra]\n");
        assert_eq!(config.repository_names(), vec!["extra"]);
    }

    #[test]
    fn test_empty_section_name_kept() {
        let config = PacmanConfig::parse("[options]\n[core]\n[]\n[extra]\n");
        assert_eq!(config.repository_names(), vec!["core", "", "extra"]);
    }

    #[test]
    fn test_empty_section_stops_registration() {
        let config = PacmanConfig::parse("[options]\n[core]\n[]\n[extra]\n");
        let mut handle = MemoryHandle::new();

        assert_eq!(config.register_repositories(&mut handle), 1);
        assert_eq!(handle.registered_names(), vec!["core"]);
        // [extra] is never attempted
        let attempts: Vec<_> = handle.registrations().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(attempts, vec!["core", ""]);
    }

    #[test]
    fn test_comment_only_and_blank() {
        let config = PacmanConfig::parse("\n   \n# [core]\n  # [extra]\n");
        assert!(config.sections().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = PacmanConfig::load(&tmp.path().join("pacman.conf")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigOpen { .. }));
    }

    #[test]
    fn test_load_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "[options]\n[core]\n[extra]\n");
        let config = PacmanConfig::load(&path).unwrap();
        assert_eq!(config.repository_names(), vec!["core", "extra"]);
    }

    #[test]
    fn test_register_in_file_order() {
        let config = PacmanConfig::parse(PACMAN_CONF);
        let mut handle = MemoryHandle::new();

        assert_eq!(config.register_repositories(&mut handle), 3);
        assert_eq!(handle.registered_names(), vec!["core", "extra", "multilib"]);
        assert!(handle
            .registrations()
            .iter()
            .all(|(_, level)| *level == SigLevel::PERMISSIVE));
    }

    #[test]
    fn test_register_stops_at_first_failure() {
        let config = PacmanConfig::parse(PACMAN_CONF);
        let mut handle = MemoryHandle::new().failing_registration("extra");

        assert_eq!(config.register_repositories(&mut handle), 1);
        assert_eq!(handle.registered_names(), vec!["core"]);
        // multilib is never attempted
        assert_eq!(handle.registrations().len(), 2);
    }
}
