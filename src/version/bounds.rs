//! Range boundary finder
//!
//! Versions are searched on a bounded grid of release versions
//! `0.0.0 ..= max_major.max_minor.max_patch`. Instead of probing the grid,
//! each OR-branch is reduced to its [`Interval`] and the extreme grid point
//! inside it is computed directly, so every lookup costs one pass over the
//! comparators.

use serde::Deserialize;

use semver::Version;

use crate::version::constraint::Constraint;
use crate::version::interval::Interval;
use crate::version::semver::{SemanticVersion, precedence};

/// Default upper bound of the major component searched
pub const MAX_MAJOR: u64 = 20;

/// Default upper bound of the minor component searched
pub const MAX_MINOR: u64 = 50;

/// Default upper bound of the patch component searched
pub const MAX_PATCH: u64 = 50;

/// The bounded simulation space searched for range boundaries and overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchBounds {
    pub max_major: u64,
    pub max_minor: u64,
    pub max_patch: u64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_major: MAX_MAJOR,
            max_minor: MAX_MINOR,
            max_patch: MAX_PATCH,
        }
    }
}

impl SearchBounds {
    pub fn new(max_major: u64, max_minor: u64, max_patch: u64) -> Self {
        Self {
            max_major,
            max_minor,
            max_patch,
        }
    }

    /// Extend the grid so that every version mentioned by `constraint` lies
    /// inside it.
    pub fn widened_for(self, constraint: &Constraint) -> Self {
        constraint.versions().fold(self, |bounds, v| bounds.covering(v))
    }

    /// Extend the grid to hold `version`, plus one major above it so that
    /// `>` on the largest mentioned version still has a match.
    pub fn covering(self, version: &Version) -> Self {
        Self {
            max_major: self.max_major.max(version.major.saturating_add(1)),
            max_minor: self.max_minor.max(version.minor),
            max_patch: self.max_patch.max(version.patch),
        }
    }

    /// Highest grid version
    pub fn ceiling(&self) -> Version {
        Version::new(self.max_major, self.max_minor, self.max_patch)
    }

    /// Highest grid version satisfying `constraint`
    pub fn highest(&self, constraint: &Constraint) -> Option<SemanticVersion> {
        constraint
            .intervals()
            .iter()
            .filter_map(|iv| self.highest_in(iv))
            .max_by(precedence)
            .map(SemanticVersion::from_version)
    }

    /// Lowest grid version satisfying `constraint`
    pub fn lowest(&self, constraint: &Constraint) -> Option<SemanticVersion> {
        constraint
            .intervals()
            .iter()
            .filter_map(|iv| self.lowest_in(iv))
            .min_by(precedence)
            .map(SemanticVersion::from_version)
    }

    /// Highest grid version inside `interval`
    pub fn highest_in(&self, interval: &Interval) -> Option<Version> {
        let candidate = match &interval.upper {
            None => self.ceiling(),
            Some(bound) => self.floor_to_grid(&bound.version, bound.inclusive)?,
        };
        interval.admits_lower(&candidate).then_some(candidate)
    }

    /// Lowest grid version inside `interval`
    pub fn lowest_in(&self, interval: &Interval) -> Option<Version> {
        let candidate = match &interval.lower {
            None => Version::new(0, 0, 0),
            Some(bound) => self.ceil_to_grid(&bound.version, bound.inclusive)?,
        };
        interval.admits_upper(&candidate).then_some(candidate)
    }

    /// Smallest grid version `>= version` (or `>` when exclusive)
    fn ceil_to_grid(&self, version: &Version, inclusive: bool) -> Option<Version> {
        let (major, minor, patch) = (version.major, version.minor, version.patch);
        // A pre-release sits just below its release, which is the next grid point
        let (major, minor, patch) = if inclusive || !version.pre.is_empty() {
            (major, minor, patch)
        } else {
            (major, minor, patch.saturating_add(1))
        };

        let (major, minor, patch) = if patch > self.max_patch {
            (major, minor.saturating_add(1), 0)
        } else {
            (major, minor, patch)
        };
        let (major, minor, patch) = if minor > self.max_minor {
            (major.saturating_add(1), 0, 0)
        } else {
            (major, minor, patch)
        };
        if major > self.max_major {
            return None;
        }
        Some(Version::new(major, minor, patch))
    }

    /// Largest grid version `<= version` (or `<` when exclusive)
    fn floor_to_grid(&self, version: &Version, inclusive: bool) -> Option<Version> {
        let release = Version::new(version.major, version.minor, version.patch);
        // A pre-release sits below its release, so the release itself is out
        let release = if inclusive && version.pre.is_empty() {
            release
        } else {
            self.predecessor(&release)?
        };

        if release.major > self.max_major {
            return Some(self.ceiling());
        }
        if release.minor > self.max_minor {
            return Some(Version::new(release.major, self.max_minor, self.max_patch));
        }
        if release.patch > self.max_patch {
            return Some(Version::new(release.major, release.minor, self.max_patch));
        }
        Some(release)
    }

    fn predecessor(&self, release: &Version) -> Option<Version> {
        let (major, minor, patch) = (release.major, release.minor, release.patch);
        if patch > 0 {
            Some(Version::new(major, minor, patch - 1))
        } else if minor > 0 {
            Some(Version::new(major, minor - 1, self.max_patch))
        } else if major > 0 {
            Some(Version::new(major - 1, self.max_minor, self.max_patch))
        } else {
            None
        }
    }
}

/// Highest version satisfying `constraint` within the default search space,
/// widened to cover every version the constraint mentions.
pub fn highest(constraint: &Constraint) -> Option<SemanticVersion> {
    SearchBounds::default()
        .widened_for(constraint)
        .highest(constraint)
}

/// Lowest version satisfying `constraint` within the default search space,
/// widened to cover every version the constraint mentions.
pub fn lowest(constraint: &Constraint) -> Option<SemanticVersion> {
    SearchBounds::default()
        .widened_for(constraint)
        .lowest(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::matcher::VersionMatcher;
    use rstest::rstest;

    fn range(spec: &str) -> Constraint {
        Constraint::parse(spec).unwrap()
    }

    /// Exhaustive scan used as ground truth on a small grid
    fn scan(bounds: &SearchBounds, constraint: &Constraint) -> Vec<Version> {
        let mut found = Vec::new();
        for major in 0..=bounds.max_major {
            for minor in 0..=bounds.max_minor {
                for patch in 0..=bounds.max_patch {
                    let candidate = Version::new(major, minor, patch);
                    if constraint.matches(&candidate) {
                        found.push(candidate);
                    }
                }
            }
        }
        found
    }

    #[rstest]
    #[case(">=1.0.0, <2.0.0", Some("1.0.0"), Some("1.50.50"))]
    #[case(">=1.2.3, <2.0.0", Some("1.2.3"), Some("1.50.50"))]
    #[case(">1.0.0, <=2.0.0", Some("1.0.1"), Some("2.0.0"))]
    #[case(">=1.0.0", Some("1.0.0"), Some("20.50.50"))]
    #[case("<1.0.0", Some("0.0.0"), Some("0.50.50"))]
    #[case("=1.2.3", Some("1.2.3"), Some("1.2.3"))]
    #[case(">=2.0.0, <1.0.0", None, None)]
    #[case(">1.0.0 <1.2.0 || >=2.0.0 <2.1.0", Some("1.0.1"), Some("2.0.50"))]
    #[case(">= 3.2.2, < 4", Some("3.2.2"), Some("3.50.50"))]
    #[case(">1.0.50", Some("1.1.0"), Some("20.50.50"))]
    #[case("<2.0.0-beta", Some("0.0.0"), Some("1.50.50"))]
    #[case(">=2.0.0-beta, <3.0.0", Some("2.0.0"), Some("2.50.50"))]
    fn boundaries_within_default_space(
        #[case] spec: &str,
        #[case] expected_lowest: Option<&str>,
        #[case] expected_highest: Option<&str>,
    ) {
        let constraint = range(spec);
        assert_eq!(
            lowest(&constraint).map(|v| v.to_string()).as_deref(),
            expected_lowest
        );
        assert_eq!(
            highest(&constraint).map(|v| v.to_string()).as_deref(),
            expected_highest
        );
    }

    #[rstest]
    #[case(">=25.0.0", Some("25.0.0"), Some("26.50.50"))]
    #[case(">=1.70.0, <=1.80.3", Some("1.70.0"), Some("1.80.3"))]
    fn boundaries_beyond_default_ceiling_are_found(
        #[case] spec: &str,
        #[case] expected_lowest: Option<&str>,
        #[case] expected_highest: Option<&str>,
    ) {
        let constraint = range(spec);
        assert_eq!(
            lowest(&constraint).map(|v| v.to_string()).as_deref(),
            expected_lowest
        );
        assert_eq!(
            highest(&constraint).map(|v| v.to_string()).as_deref(),
            expected_highest
        );
    }

    #[test]
    fn fixed_bounds_report_no_match_above_ceiling() {
        let bounds = SearchBounds::default();
        let constraint = range(">=25.0.0");
        assert_eq!(bounds.lowest(&constraint), None);
        assert_eq!(bounds.highest(&constraint), None);
    }

    #[test]
    fn bounds_deserialize_with_defaults() {
        let bounds: SearchBounds = serde_json::from_str(r#"{ "maxMajor": 5 }"#).unwrap();
        assert_eq!(bounds, SearchBounds::new(5, MAX_MINOR, MAX_PATCH));
    }

    #[rstest]
    #[case(">=1.0.0, <2.0.0")]
    #[case(">1.2.3, <=3.1.0")]
    #[case(">=0.3.2, <0.4.0 || >=2.1.0, <2.1.3")]
    #[case("<1.0.0-rc.1")]
    #[case(">1.4.4")]
    #[case("^0.2.1")]
    #[case("~2.3")]
    #[case("1.x || 3.x")]
    #[case(">=2.0.0, <2.0.0")]
    #[case(">3.4.4 || <0.0.1")]
    #[case("=4.0.0 || =0.1.4")]
    fn boundaries_agree_with_exhaustive_scan(#[case] spec: &str) {
        let bounds = SearchBounds::new(4, 4, 4);
        let constraint = range(spec);
        let found = scan(&bounds, &constraint);

        let lowest = bounds.lowest(&constraint).map(|v| v.version().clone());
        let highest = bounds.highest(&constraint).map(|v| v.version().clone());

        assert_eq!(lowest, found.first().cloned());
        assert_eq!(highest, found.last().cloned());
    }
}
