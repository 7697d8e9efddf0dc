//! Keep-or-replace decision between an existing declaration and a target
//!
//! The rule everywhere is "keep existing if it already satisfies or dominates
//! the target, otherwise adopt the target", with one guarantee on top: the
//! chosen literal never describes a version set whose lowest version is
//! below the existing one.
//!
//! | existing | target | keep existing when                                          |
//! |----------|--------|-------------------------------------------------------------|
//! | exact    | exact  | existing > target                                           |
//! | exact    | range  | existing > highest, existing satisfies, existing > lowest   |
//! | range    | exact  | lowest > target, highest > target, range contains target    |
//! | range    | range  | lowest > lowest, highest > highest, ranges overlap          |

use semver::Version;
use tracing::debug;

use crate::version::bounds::SearchBounds;
use crate::version::constraint::Constraint;
use crate::version::matcher::VersionMatcher;
use crate::version::semver::SemanticVersion;
use crate::version::term::VersionTerm;

impl SearchBounds {
    /// Extend the grid to cover every version `term` mentions
    pub fn widened_for_term(self, term: &VersionTerm) -> Self {
        match term {
            VersionTerm::Exact(version) => self.covering(version.version()),
            VersionTerm::Range(constraint) => self.widened_for(constraint),
        }
    }

    /// Whether every grid version satisfying `constraint` is below 1.0.0
    pub fn is_pre_one_range(&self, constraint: &Constraint) -> bool {
        self.highest(constraint).is_some_and(|v| v.is_pre_one())
    }

    /// Lowest exact version of `constraint`
    ///
    /// When an inclusive lower bound sits on that version, its literal is
    /// returned so that pre-release and build tags survive.
    pub fn collapse(&self, constraint: &Constraint) -> Option<SemanticVersion> {
        let lowest = self.lowest(constraint)?;
        let written = constraint
            .intervals()
            .into_iter()
            .filter_map(|iv| iv.lower)
            .filter(|bound| bound.inclusive && same_release(&bound.version, lowest.version()))
            .map(|bound| bound.version)
            .next();

        Some(written.map_or(lowest, SemanticVersion::from_version))
    }

    /// Pick the literal to write for `target` given the `existing` declaration
    pub fn decide(&self, existing: &VersionTerm, target: &VersionTerm) -> String {
        let (keep, reason) = match (existing, target) {
            (VersionTerm::Exact(old), VersionTerm::Exact(new)) => {
                (old > new, "existing exact version is newer")
            }
            (VersionTerm::Exact(old), VersionTerm::Range(new)) => self.exact_over_range(old, new),
            (VersionTerm::Range(old), VersionTerm::Exact(new)) => self.range_over_exact(old, new),
            (VersionTerm::Range(old), VersionTerm::Range(new)) => self.range_over_range(old, new),
        };

        let chosen = if keep { existing } else { target };
        debug!(
            "decide existing='{}' target='{}' -> '{}' ({})",
            existing.literal(),
            target.literal(),
            chosen.literal(),
            if keep { reason } else { "adopting target" }
        );
        chosen.literal().to_string()
    }

    fn exact_over_range(&self, old: &SemanticVersion, new: &Constraint) -> (bool, &'static str) {
        let Some(lowest) = self.lowest(new) else {
            return (true, "target range has no version in the search space");
        };
        if self.highest(new).is_some_and(|highest| *old > highest) {
            return (true, "existing version is above the target range");
        }
        if new.matches(old.version()) {
            return (true, "existing version satisfies the target range");
        }
        (*old > lowest, "existing version is above the target floor")
    }

    fn range_over_exact(&self, old: &Constraint, new: &SemanticVersion) -> (bool, &'static str) {
        if self.lowest(old).is_some_and(|lowest| lowest > *new) {
            return (true, "existing range starts above the target");
        }
        if self.highest(old).is_some_and(|highest| highest > *new) {
            return (true, "existing range reaches above the target");
        }
        (
            old.matches(new.version()),
            "target is inside the existing range",
        )
    }

    fn range_over_range(&self, old: &Constraint, new: &Constraint) -> (bool, &'static str) {
        let Some(new_lowest) = self.lowest(new) else {
            return (true, "target range has no version in the search space");
        };
        if self.lowest(old).is_some_and(|lowest| lowest > new_lowest) {
            return (true, "existing range starts above the target range");
        }
        let reaches_higher = match (self.highest(old), self.highest(new)) {
            (Some(old_highest), Some(new_highest)) => old_highest > new_highest,
            _ => false,
        };
        if reaches_higher {
            return (true, "existing range reaches above the target range");
        }
        (self.overlaps(old, new), "ranges overlap")
    }
}

fn same_release(a: &Version, b: &Version) -> bool {
    (a.major, a.minor, a.patch) == (b.major, b.minor, b.patch)
}

/// Decide between `existing` and `target` within the default search space,
/// widened to cover both terms.
pub fn decide(existing: &VersionTerm, target: &VersionTerm) -> String {
    SearchBounds::default()
        .widened_for_term(existing)
        .widened_for_term(target)
        .decide(existing, target)
}
