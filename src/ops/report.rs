//! Upgrade candidate detection and reporting.
//!
//! For every capability a foreign package provides, the first sync provider
//! is compared against the foreign package. A candidate is reported when
//! the provider is newer and the difference is more than a release bump.

use std::io::{self, Write};

use serde::Serialize;

use crate::core::version::is_release_bump;
use crate::core::Package;
use crate::db::Handle;
use crate::errors::ScanError;
use crate::ops::foreign::find_foreign_packages;
use crate::ops::provides::{find_provider_in, Provider};
use crate::util::shell::{Color, Shell};

/// A foreign package whose capability is offered, newer, by a sync package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Foreign package name
    pub package: String,
    /// The provided capability
    pub capability: String,
    /// Sync package providing the capability
    pub provider: String,
    /// Repository of the provider
    pub repository: String,
    /// Installed version of the foreign package
    pub old_version: String,
    /// Version of the provider
    pub new_version: String,
}

impl Candidate {
    fn new(foreign: &Package, capability: &str, provider: &Provider) -> Self {
        Candidate {
            package: foreign.name().to_string(),
            capability: capability.to_string(),
            provider: provider.package.name().to_string(),
            repository: provider.repository.clone(),
            old_version: foreign.version().to_string(),
            new_version: provider.package.version().to_string(),
        }
    }

    /// Render the report line:
    /// `<package> [provides <capability>] <old> -> <new>`.
    pub fn render(&self, shell: &Shell) -> String {
        format!(
            "{} [provides {}] {} -> {}",
            self.package,
            self.capability,
            shell.paint(&self.old_version, Color::Red),
            shell.paint(&self.new_version, Color::Green)
        )
    }
}

/// Find every upgrade candidate, in local database then provides order.
pub fn find_candidates(handle: &dyn Handle) -> Vec<Candidate> {
    let sync_dbs = handle.sync_dbs();
    let mut candidates = Vec::new();

    for pkg in find_foreign_packages(handle) {
        for provision in pkg.provides() {
            let capability = provision.name();

            let Some(provider) = find_provider_in(&sync_dbs, capability) else {
                continue;
            };

            let old = pkg.version();
            let new = provider.package.version();

            if !handle.vercmp(new, old).is_gt() {
                tracing::debug!(
                    "{}: {} {} is not newer than {}",
                    pkg.name(),
                    provider.package.name(),
                    new,
                    old
                );
                continue;
            }

            if is_release_bump(old, new) {
                tracing::debug!("{}: {} -> {} is a release bump only", pkg.name(), old, new);
                continue;
            }

            candidates.push(Candidate::new(&pkg, capability, &provider));
        }
    }

    candidates
}

/// Write candidates to `out`, one per line. Returns the number written.
///
/// On a write error the returned [`ScanError::Report`] carries how many
/// lines made it out before the failure.
pub fn write_report(
    shell: &Shell,
    candidates: &[Candidate],
    out: &mut dyn Write,
) -> Result<usize, ScanError> {
    let mut written = 0;

    for candidate in candidates {
        write_line(shell, candidate, out)
            .map_err(|source| ScanError::Report { written, source })?;
        written += 1;
    }
    out.flush()
        .map_err(|source| ScanError::Report { written, source })?;

    Ok(written)
}

fn write_line(shell: &Shell, candidate: &Candidate, out: &mut dyn Write) -> io::Result<()> {
    if shell.is_json() {
        let line = serde_json::to_string(candidate).map_err(io::Error::other)?;
        writeln!(out, "{}", line)
    } else {
        writeln!(out, "{}", candidate.render(shell))
    }
}
