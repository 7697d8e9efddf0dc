//! Update strategies and the resolution entry point

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::bounds::SearchBounds;
use crate::version::constraint::Constraint;
use crate::version::error::{ResolutionError, UnknownStrategy};
use crate::version::matcher::VersionMatcher;
use crate::version::normalize::normalize;
use crate::version::semver::SemanticVersion;
use crate::version::term::VersionTerm;

/// How a requested target is written back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Keep the shape (exact or range) the existing declaration uses
    #[default]
    Dynamic,
    /// Always write a single exact version
    Exact,
    /// Write `>=X.Y.Z, <(X+1).0.0` ranges, except below 1.0.0
    Range,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Dynamic => "dynamic",
            Strategy::Exact => "exact",
            Strategy::Range => "range",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Strategy::Dynamic),
            "exact" => Ok(Strategy::Exact),
            "range" => Ok(Strategy::Range),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Applies strategies within a configurable search space
///
/// The configured bounds are a floor: each call widens them to cover every
/// version mentioned by its target and existing literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    bounds: SearchBounds,
}

impl Resolver {
    pub fn new(bounds: SearchBounds) -> Self {
        Self { bounds }
    }

    /// Resolve the literal to write for `target` over `existing`.
    ///
    /// An empty `existing` means there is no prior declaration. An existing
    /// literal that does not parse is treated the same way; only an invalid
    /// target fails the call.
    pub fn apply(
        &self,
        strategy: Strategy,
        target: &str,
        existing: &str,
    ) -> Result<String, ResolutionError> {
        let target_term = VersionTerm::parse(target)?;
        let existing_term = parse_existing(existing);

        let bounds = existing_term
            .iter()
            .fold(self.bounds.widened_for_term(&target_term), |bounds, term| {
                bounds.widened_for_term(term)
            });

        let resolved = match strategy {
            Strategy::Exact => resolve_exact(&bounds, target, target_term, existing_term.as_ref())?,
            Strategy::Range => resolve_range(&bounds, target_term, existing_term.as_ref())?,
            Strategy::Dynamic => resolve_dynamic(&bounds, target_term, existing_term.as_ref()),
        };

        let normalized = normalize(&resolved);
        debug!(
            "{} strategy: target='{}' existing='{}' -> '{}'",
            strategy, target, existing, normalized
        );
        Ok(normalized)
    }
}

/// Resolve with the default search space, see [`Resolver::apply`]
pub fn apply_strategy(
    strategy: Strategy,
    target: &str,
    existing: &str,
) -> Result<String, ResolutionError> {
    Resolver::default().apply(strategy, target, existing)
}

fn parse_existing(existing: &str) -> Option<VersionTerm> {
    if existing.trim().is_empty() {
        return None;
    }
    VersionTerm::parse(existing)
        .inspect_err(|e| warn!("Ignoring unparseable existing version '{}': {}", existing, e))
        .ok()
}

/// A range confined to 0.x becomes its lowest exact version
///
/// A pre-release floor keeps its tag, so the written version may not itself
/// satisfy a release-only upper bound of the range it came from.
fn collapse_pre_one(bounds: &SearchBounds, constraint: &Constraint) -> Option<VersionTerm> {
    if !bounds.is_pre_one_range(constraint) {
        return None;
    }
    let collapsed = bounds.collapse(constraint)?;
    debug!(
        "Collapsing pre-1.0 range '{}' to '{}'",
        constraint.literal(),
        collapsed
    );
    Some(VersionTerm::Exact(collapsed))
}

fn lowest_of(bounds: &SearchBounds, term: &VersionTerm) -> Option<SemanticVersion> {
    match term {
        VersionTerm::Exact(version) => Some(version.clone()),
        VersionTerm::Range(constraint) => bounds.lowest(constraint),
    }
}

fn resolve_exact(
    bounds: &SearchBounds,
    literal: &str,
    target: VersionTerm,
    existing: Option<&VersionTerm>,
) -> Result<String, ResolutionError> {
    let VersionTerm::Exact(target) = target else {
        return Err(ResolutionError::InvalidTargetForStrategy(
            literal.trim().to_string(),
        ));
    };

    let kept = match existing {
        Some(VersionTerm::Exact(old)) => Some(old.clone()).filter(|old| *old > target),
        Some(VersionTerm::Range(old)) => bounds.lowest(old).filter(|lowest| *lowest > target),
        None => None,
    };

    if let Some(kept) = &kept {
        debug!("Keeping '{}' above exact target '{}'", kept, target);
    }
    Ok(kept.unwrap_or(target).to_string())
}

fn resolve_range(
    bounds: &SearchBounds,
    target: VersionTerm,
    existing: Option<&VersionTerm>,
) -> Result<String, ResolutionError> {
    let converted = match &target {
        VersionTerm::Exact(version) if version.is_pre_one() => target.clone(),
        VersionTerm::Exact(version) => Constraint::next_major(version.version())
            .map(VersionTerm::Range)
            .ok_or_else(|| ResolutionError::MajorOutOfRange(version.literal().to_string()))?,
        VersionTerm::Range(constraint) => {
            collapse_pre_one(bounds, constraint).unwrap_or_else(|| target.clone())
        }
    };
    let floor = lowest_of(bounds, &converted);

    match existing {
        Some(VersionTerm::Range(old)) => {
            let contains_target =
                matches!(&target, VersionTerm::Exact(version) if old.matches(version.version()));
            let starts_higher = match (bounds.lowest(old), &floor) {
                (Some(lowest), Some(floor)) => lowest > *floor,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if contains_target || starts_higher {
                debug!("Keeping existing range '{}'", old.literal());
                return Ok(old.literal().to_string());
            }
        }
        Some(VersionTerm::Exact(old)) if floor.as_ref().is_none_or(|floor| old > floor) => {
            let Some(widened) = Constraint::next_major(old.version()).filter(|_| !old.is_pre_one())
            else {
                return Ok(old.literal().to_string());
            };
            debug!(
                "Existing '{}' is above the target floor, writing '{}'",
                old.literal(),
                widened
            );
            return Ok(widened.literal().to_string());
        }
        _ => {}
    }

    Ok(converted.literal().to_string())
}

fn resolve_dynamic(
    bounds: &SearchBounds,
    target: VersionTerm,
    existing: Option<&VersionTerm>,
) -> String {
    let target = match (existing, target) {
        (Some(VersionTerm::Range(old)), VersionTerm::Exact(version))
            if !version.is_pre_one() && !old.matches(version.version()) =>
        {
            // A major that cannot be bumped stays exact
            match Constraint::next_major(version.version()) {
                Some(range) => VersionTerm::Range(range),
                None => VersionTerm::Exact(version),
            }
        }
        (_, VersionTerm::Range(constraint)) => {
            collapse_pre_one(bounds, &constraint).unwrap_or(VersionTerm::Range(constraint))
        }
        (_, target) => target,
    };

    match existing {
        None => target.literal().to_string(),
        Some(existing) => bounds.decide(existing, &target),
    }
}
