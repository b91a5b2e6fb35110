//! Package version ordering.
//!
//! Versions follow pacman's `[epoch:]upstream[-release]` layout. Ordering is
//! delegated to [`alpm_types::Version`], which compares the same way pacman's
//! `vercmp` does.

use std::cmp::Ordering;
use std::str::FromStr;

use alpm_types::Version;

/// Compare two package versions the way pacman does.
///
/// A version that does not parse compares equal to anything, so it is never
/// taken for an upgrade.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    match (Version::from_str(a), Version::from_str(b)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        (Err(e), _) | (_, Err(e)) => {
            tracing::debug!("cannot compare `{}` with `{}`: {}", a, b, e);
            Ordering::Equal
        }
    }
}

/// The upstream part of a version: everything before the last hyphen.
///
/// A version without a hyphen is all upstream.
pub fn upstream(version: &str) -> &str {
    version
        .rsplit_once('-')
        .map_or(version, |(upstream, _release)| upstream)
}

/// Whether going from `old` to `new` only changes the package release.
pub fn is_release_bump(old: &str, new: &str) -> bool {
    upstream(old) == upstream(new)
}
