//! Version matching abstraction shared by exact versions and ranges

use semver::Version;

/// Anything that can accept or reject a concrete version
///
/// Implemented at every level of a range (single comparator, AND-conjunction,
/// full OR-list) and by [`VersionTerm`](crate::version::term::VersionTerm),
/// where an exact version accepts only versions of equal precedence.
pub trait VersionMatcher {
    /// Check if `version` satisfies this matcher
    fn matches(&self, version: &Version) -> bool;
}
