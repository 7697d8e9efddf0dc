//! Version term parsing: exact version or range constraint

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::version::constraint::Constraint;
use crate::version::error::ParseError;
use crate::version::matcher::VersionMatcher;
use crate::version::semver::SemanticVersion;
use crate::version::shorthand::expand_shorthand;

/// A parsed version declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionTerm {
    /// A single version such as `1.2.3` or `0.4.0-beta+build.7`
    Exact(SemanticVersion),
    /// A constraint such as `>= 1.0.0, < 2.0.0 || ~> 3.1`
    Range(Constraint),
}

impl VersionTerm {
    /// Parse a version declaration.
    ///
    /// The exact grammar is tried first; anything else has its `~>` shorthand
    /// expanded and is parsed as a range.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        if let Some(version) = SemanticVersion::parse(input) {
            return Ok(VersionTerm::Exact(version));
        }

        let expanded = expand_shorthand(input)?;
        Constraint::parse(&expanded)
            .map(VersionTerm::Range)
            .map_err(|_| ParseError::InvalidSyntax(input.to_string()))
    }

    /// Source literal: as written for exact versions, shorthand-expanded
    /// for ranges
    pub fn literal(&self) -> &str {
        match self {
            VersionTerm::Exact(version) => version.literal(),
            VersionTerm::Range(constraint) => constraint.literal(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, VersionTerm::Exact(_))
    }
}

impl VersionMatcher for VersionTerm {
    fn matches(&self, version: &Version) -> bool {
        match self {
            VersionTerm::Exact(exact) => SemanticVersion::from_version(version.clone()) == *exact,
            VersionTerm::Range(constraint) => constraint.matches(version),
        }
    }
}

impl FromStr for VersionTerm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionTerm::parse(s)
    }
}

impl fmt::Display for VersionTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionTerm::Exact(version) => write!(f, "{version}"),
            VersionTerm::Range(constraint) => write!(f, "{constraint}"),
        }
    }
}

/// Parse a version declaration, see [`VersionTerm::parse`]
pub fn parse(input: &str) -> Result<VersionTerm, ParseError> {
    VersionTerm::parse(input)
}
