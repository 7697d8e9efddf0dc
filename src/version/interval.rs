//! Effective version interval of a range conjunction
//!
//! Lower bounds come from `>`, `>=` and `=` comparators, upper bounds from
//! `<`, `<=` and `=`; a conjunction intersects them all. Intervals order
//! versions by semver precedence and ignore the pre-release opt-in rule of
//! [`Comparator`], which only matters for pre-release candidates.

use std::cmp::Ordering;

use semver::Version;

use crate::version::constraint::{Comparator, Op};
use crate::version::semver::precedence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: true,
        }
    }

    pub fn exclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: false,
        }
    }
}

/// `None` on either side means unbounded on that side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interval {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl Interval {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_comparator(comparator: &Comparator) -> Self {
        let version = comparator.version.clone();
        match comparator.op {
            Op::Gte => Self {
                lower: Some(Bound::inclusive(version)),
                upper: None,
            },
            Op::Gt => Self {
                lower: Some(Bound::exclusive(version)),
                upper: None,
            },
            Op::Lte => Self {
                lower: None,
                upper: Some(Bound::inclusive(version)),
            },
            Op::Lt => Self {
                lower: None,
                upper: Some(Bound::exclusive(version)),
            },
            Op::Eq => Self {
                lower: Some(Bound::inclusive(version.clone())),
                upper: Some(Bound::inclusive(version)),
            },
        }
    }

    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            lower: tighter(&self.lower, &other.lower, Ordering::Greater),
            upper: tighter(&self.upper, &other.upper, Ordering::Less),
        }
    }

    pub fn admits_lower(&self, version: &Version) -> bool {
        match &self.lower {
            None => true,
            Some(bound) => match precedence(version, &bound.version) {
                Ordering::Greater => true,
                Ordering::Equal => bound.inclusive,
                Ordering::Less => false,
            },
        }
    }

    pub fn admits_upper(&self, version: &Version) -> bool {
        match &self.upper {
            None => true,
            Some(bound) => match precedence(version, &bound.version) {
                Ordering::Less => true,
                Ordering::Equal => bound.inclusive,
                Ordering::Greater => false,
            },
        }
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.admits_lower(version) && self.admits_upper(version)
    }

    /// True when no version at all lies between the bounds
    pub fn is_empty(&self) -> bool {
        let (Some(lower), Some(upper)) = (&self.lower, &self.upper) else {
            return false;
        };
        match precedence(&lower.version, &upper.version) {
            Ordering::Greater => true,
            Ordering::Equal => !(lower.inclusive && upper.inclusive),
            Ordering::Less => false,
        }
    }
}

/// Pick the more restrictive of two bounds; `wins` is the ordering that
/// makes a bound tighter (greater for lower bounds, less for upper bounds).
fn tighter(a: &Option<Bound>, b: &Option<Bound>, wins: Ordering) -> Option<Bound> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => {
            let ord = precedence(&x.version, &y.version);
            if ord == wins {
                Some(x.clone())
            } else if ord == Ordering::Equal {
                Some(Bound {
                    version: x.version.clone(),
                    inclusive: x.inclusive && y.inclusive,
                })
            } else {
                Some(y.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::constraint::Constraint;
    use rstest::rstest;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn interval(spec: &str) -> Interval {
        let constraint = Constraint::parse(spec).unwrap();
        constraint.intervals().remove(0)
    }

    #[test]
    fn conjunction_intersects_all_comparators() {
        let iv = interval(">=1.0.0, >1.2.0, <3.0.0, <=2.5.0");
        assert_eq!(iv.lower, Some(Bound::exclusive(v("1.2.0"))));
        assert_eq!(iv.upper, Some(Bound::inclusive(v("2.5.0"))));
    }

    #[test]
    fn equal_bounds_keep_the_exclusive_one() {
        let iv = interval(">=1.0.0, >1.0.0");
        assert_eq!(iv.lower, Some(Bound::exclusive(v("1.0.0"))));
    }

    #[test]
    fn eq_comparator_pins_both_sides() {
        let iv = interval("=1.2.3");
        assert!(iv.contains(&v("1.2.3")));
        assert!(!iv.contains(&v("1.2.4")));
        assert!(!iv.is_empty());
    }

    #[rstest]
    #[case(">=2.0.0, <1.0.0", true)]
    #[case(">1.0.0, <1.0.0", true)]
    #[case(">=1.0.0, <=1.0.0", false)]
    #[case(">=1.0.0, <1.0.0", true)]
    #[case(">=1.0.0", false)]
    #[case("<1.0.0", false)]
    fn is_empty_detects_inverted_bounds(#[case] spec: &str, #[case] expected: bool) {
        assert_eq!(interval(spec).is_empty(), expected);
    }

    #[test]
    fn unbounded_contains_everything() {
        let iv = Interval::unbounded();
        assert!(iv.contains(&v("0.0.0")));
        assert!(iv.contains(&v("999.0.0")));
    }
}
