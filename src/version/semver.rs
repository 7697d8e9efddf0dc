use std::cmp::Ordering;
use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

/// Compare two versions by semver precedence, ignoring build metadata.
pub fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// An exact semantic version together with the literal it was parsed from.
///
/// Equality and ordering follow semver precedence, so `1.0.0+a` and
/// `1.0.0+b` compare equal while keeping their own literals.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    version: Version,
    literal: String,
}

impl SemanticVersion {
    /// Parse a strict `MAJOR.MINOR.PATCH[-pre][+build]` version.
    ///
    /// A single leading `v` is tolerated; partial versions such as `1.2`
    /// are rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let literal = input.trim();
        let bare = literal.strip_prefix('v').unwrap_or(literal);
        let version = Version::parse(bare).ok()?;
        Some(Self {
            version,
            literal: literal.to_string(),
        })
    }

    pub fn from_version(version: Version) -> Self {
        let literal = version.to_string();
        Self { version, literal }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Versions below 1.0.0 make no compatibility promise across minor bumps.
    pub fn is_pre_one(&self) -> bool {
        self.version.major == 0
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        precedence(&self.version, &other.version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// A version as written inside a range, where trailing components may be
/// missing (`1.2`) or wildcards (`1.x`, `1.2.*`, `*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartialVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl PartialVersion {
    /// Parse a partial version, normalizing missing components to wildcards.
    ///
    /// Examples:
    /// - "1" -> 1.*.*
    /// - "1.2" -> 1.2.*
    /// - "1.2.3-rc.1" -> 1.2.3-rc.1
    /// - "1.x.3" -> rejected, nothing may follow a wildcard
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.strip_prefix('v').unwrap_or(input);
        if input.is_empty() {
            return None;
        }

        let (rest, build) = match input.split_once('+') {
            Some((rest, build)) => (rest, BuildMetadata::new(build).ok()?),
            None => (input, BuildMetadata::EMPTY),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Prerelease::new(pre).ok()?),
            None => (rest, Prerelease::EMPTY),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return None;
        }

        let mut components = [None; 3];
        let mut wildcard_seen = false;
        for (slot, part) in components.iter_mut().zip(&parts) {
            if is_wildcard(part) {
                wildcard_seen = true;
                continue;
            }
            if wildcard_seen {
                return None;
            }
            *slot = Some(parse_component(part)?);
        }

        let [major, minor, patch] = components;
        let complete = patch.is_some();
        if !complete && (!pre.is_empty() || !build.is_empty()) {
            return None;
        }

        Some(Self {
            major,
            minor,
            patch,
            pre,
            build,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.patch.is_some()
    }

    /// Pad missing components with zero.
    pub fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: self.build.clone(),
        }
    }

    /// Number of explicitly written numeric components.
    pub fn precision(&self) -> usize {
        [self.major, self.minor, self.patch]
            .iter()
            .take_while(|c| c.is_some())
            .count()
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", "1.2.3")]
    #[case("v2.0.0", "2.0.0")]
    #[case("1.2.3-alpha.1+build123", "1.2.3-alpha.1+build123")]
    #[case(" 0.4.0 ", "0.4.0")]
    fn semantic_version_parses_strict_triples(#[case] input: &str, #[case] expected: &str) {
        let version = SemanticVersion::parse(input).unwrap();
        assert_eq!(version.to_string(), expected);
        assert_eq!(version.literal(), input.trim());
    }

    #[rstest]
    #[case("1")]
    #[case("1.2")]
    #[case("1.2.3.4")]
    #[case(">=1.0.0")]
    #[case("invalid_version")]
    #[case("")]
    fn semantic_version_rejects_non_triples(#[case] input: &str) {
        assert!(SemanticVersion::parse(input).is_none());
    }

    #[test]
    fn semantic_version_ignores_build_metadata_when_comparing() {
        let a = SemanticVersion::parse("1.0.0+a").unwrap();
        let b = SemanticVersion::parse("1.0.0+b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.literal(), "1.0.0+a");
    }

    #[rstest]
    #[case("1.0.0-alpha", "1.0.0")]
    #[case("0.9.9", "1.0.0")]
    #[case("0.50.50", "1.0.0-rc.1")]
    #[case("1.0.0-alpha", "1.0.0-beta")]
    fn semantic_version_orders_by_precedence(#[case] lower: &str, #[case] higher: &str) {
        let lower = SemanticVersion::parse(lower).unwrap();
        let higher = SemanticVersion::parse(higher).unwrap();
        assert!(lower < higher);
    }

    #[rstest]
    #[case("1", Some(1), None, None)]
    #[case("1.2", Some(1), Some(2), None)]
    #[case("1.2.3", Some(1), Some(2), Some(3))]
    #[case("1.x", Some(1), None, None)]
    #[case("1.2.*", Some(1), Some(2), None)]
    #[case("*", None, None, None)]
    #[case("v3", Some(3), None, None)]
    fn partial_version_parses_components(
        #[case] input: &str,
        #[case] major: Option<u64>,
        #[case] minor: Option<u64>,
        #[case] patch: Option<u64>,
    ) {
        let partial = PartialVersion::parse(input).unwrap();
        assert_eq!((partial.major, partial.minor, partial.patch), (major, minor, patch));
    }

    #[rstest]
    #[case("1.x.3")]
    #[case("1.2-beta")]
    #[case("1.2.3.4")]
    #[case("+1.0.0")]
    #[case("1..2")]
    #[case("")]
    fn partial_version_rejects_malformed_input(#[case] input: &str) {
        assert!(PartialVersion::parse(input).is_none());
    }

    #[test]
    fn partial_version_floor_pads_with_zero() {
        let partial = PartialVersion::parse("4").unwrap();
        assert_eq!(partial.floor(), Version::new(4, 0, 0));
        assert_eq!(partial.precision(), 1);
        assert!(!partial.is_complete());
    }
}
