//! Range overlap detection

use crate::version::bounds::SearchBounds;
use crate::version::constraint::Constraint;

impl SearchBounds {
    /// Whether some grid version satisfies both `a` and `b`
    ///
    /// Disjoint hulls are rejected from the boundary versions alone;
    /// otherwise every pair of OR-branches is intersected and checked for a
    /// grid point.
    pub fn overlaps(&self, a: &Constraint, b: &Constraint) -> bool {
        let (Some(a_low), Some(a_high), Some(b_low), Some(b_high)) = (
            self.lowest(a),
            self.highest(a),
            self.lowest(b),
            self.highest(b),
        ) else {
            return false;
        };

        if a_high < b_low || b_high < a_low {
            return false;
        }

        let b_intervals = b.intervals();
        a.intervals().iter().any(|x| {
            b_intervals
                .iter()
                .any(|y| self.lowest_in(&x.intersect(y)).is_some())
        })
    }
}

/// Whether two ranges share a version within the default search space,
/// widened to cover every version either range mentions.
pub fn overlaps(a: &Constraint, b: &Constraint) -> bool {
    SearchBounds::default()
        .widened_for(a)
        .widened_for(b)
        .overlaps(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::term::{VersionTerm, parse};
    use rstest::rstest;

    fn range(spec: &str) -> Constraint {
        match parse(spec).unwrap() {
            VersionTerm::Range(constraint) => constraint,
            VersionTerm::Exact(v) => panic!("expected a range, got exact {v}"),
        }
    }

    #[rstest]
    #[case(">=1.0.0,<2.0.0", ">=1.5.0,<1.6.0", true)]
    #[case(">=2.0.0,<3.0.0", ">=3.0.0,<4.0.0", false)]
    #[case("~>3", ">=2.0.0,<4.0.0", true)]
    #[case("^1.2.3", "~1.2", true)]
    #[case(">1.0.0 <1.2.0 || >=2.0.0 <2.1.0", "1.x", true)]
    #[case(">=1.0.0, <=2.0.0", ">=2.0.0, <3.0.0", true)]
    #[case(">=1.0.0, <2.0.0", ">2.0.0", false)]
    #[case(">=1.0.0, <1.1.0 || >=3.0.0, <3.1.0", ">=2.0.0, <2.5.0", false)]
    #[case(">=1.0.0, <1.1.0 || >=3.0.0, <3.1.0", ">=1.5.0, <3.0.1", true)]
    #[case(">=2.0.0, <1.0.0", ">=0.0.0", false)]
    #[case(">=30.0.0, <31.0.0", ">=30.5.0", true)]
    #[case(">1.0.0, <1.0.1", ">=1.0.0", false)]
    fn overlaps_matches_expected(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        let (a, b) = (range(a), range(b));
        assert_eq!(overlaps(&a, &b), expected);
        assert_eq!(overlaps(&b, &a), expected, "overlap must be symmetric");
    }

    #[test]
    fn hull_overlap_without_shared_version_is_rejected() {
        // hulls [1.0.0, 3.0.50] and [2.0.0, 2.50.50] intersect, branches do not
        let a = range(">=1.0.0, <1.1.0 || >=3.0.0, <3.1.0");
        let b = range(">=2.0.0, <3.0.0");
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn explicit_bounds_limit_the_search() {
        let a = range(">=5.0.0");
        let b = range("<10.0.0");
        assert!(SearchBounds::new(6, 2, 2).overlaps(&a, &b));
        assert!(!SearchBounds::new(4, 2, 2).overlaps(&a, &b));
    }
}
