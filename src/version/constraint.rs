//! Range constraint grammar
//!
//! A constraint is an OR-list (`||`) of AND-conjunctions. Terms inside a
//! conjunction are separated by commas and/or whitespace, and a comparator
//! may directly follow a version (`>=1.0.0<2.0.0`).
//!
//! Supported terms, all desugared into plain comparators at parse time:
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `=1.2.3` - comparison operators
//! - `< 4` - partial versions are zero-padded (`< 4.0.0`)
//! - `^1.2.3` - caret: >=1.2.3 <2.0.0 (narrower for 0.x and 0.0.x)
//! - `~1.2.3` - tilde: >=1.2.3 <1.3.0 (`~1` is >=1.0.0 <2.0.0)
//! - `1.2.x`, `1.*`, `1.2`, `1`, `*` - wildcards
//! - `1.0.0 - 2.0.0` - hyphen range: >=1.0.0 <=2.0.0
//!
//! The `~>` shorthand is not part of this grammar; it is expanded
//! beforehand by [`expand_shorthand`](crate::version::shorthand::expand_shorthand).

use std::fmt;

use semver::Version;

use crate::version::error::ParseError;
use crate::version::interval::Interval;
use crate::version::matcher::VersionMatcher;
use crate::version::semver::{PartialVersion, precedence};

/// Comparison operator of a single range term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Gte => ">=",
            Op::Gt => ">",
            Op::Lte => "<=",
            Op::Lt => "<",
            Op::Eq => "=",
        }
    }
}

/// A single `(operator, version)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

impl Comparator {
    pub fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }
}

impl VersionMatcher for Comparator {
    fn matches(&self, version: &Version) -> bool {
        // A pre-release only satisfies comparators that opt into pre-releases
        if !version.pre.is_empty() && self.version.pre.is_empty() {
            return false;
        }

        let ord = precedence(version, &self.version);
        match self.op {
            Op::Gte => ord.is_ge(),
            Op::Gt => ord.is_gt(),
            Op::Lte => ord.is_le(),
            Op::Lt => ord.is_lt(),
            Op::Eq => ord.is_eq(),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// Comparators that must all hold (AND)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    comparators: Vec<Comparator>,
}

impl Conjunction {
    /// Effective interval of all comparators intersected
    pub fn interval(&self) -> Interval {
        self.comparators
            .iter()
            .fold(Interval::unbounded(), |acc, c| {
                acc.intersect(&Interval::from_comparator(c))
            })
    }

    /// Parse one `||` branch
    fn parse(branch: &str) -> Option<Self> {
        let tokens = tokenize(branch)?;
        let mut comparators = Vec::new();
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            match token {
                Token::Operator(op) => {
                    let Some(Token::Version(raw)) = iter.next() else {
                        return None;
                    };
                    push_term(op, raw, &mut comparators)?;
                }
                Token::Version(from) => {
                    if iter.peek() == Some(&Token::Version("-")) {
                        iter.next();
                        let Some(Token::Version(to)) = iter.next() else {
                            return None;
                        };
                        push_hyphen(from, to, &mut comparators)?;
                    } else {
                        push_term("", from, &mut comparators)?;
                    }
                }
            }
        }

        if comparators.is_empty() {
            return None;
        }
        Some(Self { comparators })
    }
}

impl VersionMatcher for Conjunction {
    fn matches(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comparator) in self.comparators.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{comparator}")?;
        }
        Ok(())
    }
}

/// A parsed range constraint: an OR-list of AND-conjunctions
///
/// Always holds at least one conjunction, each with at least one comparator.
/// Equality compares the parsed structure, not the literal.
#[derive(Debug, Clone)]
pub struct Constraint {
    branches: Vec<Conjunction>,
    literal: String,
}

impl Constraint {
    /// Parse a range that has already had `~>` shorthand expanded
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let literal = input.trim();
        if literal.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let branches: Option<Vec<Conjunction>> = literal
            .split("||")
            .map(|branch| Conjunction::parse(branch.trim()))
            .collect();

        match branches {
            Some(branches) => Ok(Self {
                branches,
                literal: literal.to_string(),
            }),
            None => Err(ParseError::InvalidSyntax(input.to_string())),
        }
    }

    /// `>=version, <(major+1).0.0`, `None` when the major cannot be bumped
    pub fn next_major(version: &Version) -> Option<Self> {
        let ceiling = Version::new(version.major.checked_add(1)?, 0, 0);
        let comparators = vec![
            Comparator::new(Op::Gte, version.clone()),
            Comparator::new(Op::Lt, ceiling),
        ];
        let conjunction = Conjunction { comparators };
        let literal = conjunction.to_string();
        Some(Self {
            branches: vec![conjunction],
            literal,
        })
    }

    /// Source text of this constraint (after shorthand expansion)
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// One interval per OR-branch
    pub fn intervals(&self) -> Vec<Interval> {
        self.branches.iter().map(Conjunction::interval).collect()
    }

    /// Every version mentioned by any comparator
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.branches
            .iter()
            .flat_map(|b| b.comparators.iter().map(|c| &c.version))
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.branches == other.branches
    }
}

impl Eq for Constraint {}

impl VersionMatcher for Constraint {
    fn matches(&self, version: &Version) -> bool {
        self.branches.iter().any(|b| b.matches(version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{branch}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Operator(&'a str),
    Version(&'a str),
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '^' | '~' | '!')
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '*')
}

/// Split a branch into operator and version tokens, dropping separators
fn tokenize(branch: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = branch;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        let Some(first) = rest.chars().next() else {
            break;
        };

        let operator = is_operator_char(first);
        if !operator && !is_version_char(first) {
            return None;
        }

        let end = rest
            .find(|c: char| {
                if operator {
                    !is_operator_char(c)
                } else {
                    !is_version_char(c)
                }
            })
            .unwrap_or(rest.len());

        let (text, tail) = rest.split_at(end);
        tokens.push(if operator {
            Token::Operator(text)
        } else {
            Token::Version(text)
        });
        rest = tail;
    }

    Some(tokens)
}

fn push_term(op: &str, raw: &str, out: &mut Vec<Comparator>) -> Option<()> {
    let partial = PartialVersion::parse(raw)?;
    match op {
        ">=" => out.push(Comparator::new(Op::Gte, partial.floor())),
        ">" => out.push(Comparator::new(Op::Gt, partial.floor())),
        "<=" => out.push(Comparator::new(Op::Lte, partial.floor())),
        "<" => out.push(Comparator::new(Op::Lt, partial.floor())),
        "" | "=" => push_wildcard(&partial, out)?,
        "^" => push_caret(&partial, out)?,
        "~" => push_tilde(&partial, out)?,
        _ => return None,
    }
    Some(())
}

/// `1.2.3` is exact; `1.2`, `1.2.x` span a minor; `1`, `1.x` span a major
fn push_wildcard(partial: &PartialVersion, out: &mut Vec<Comparator>) -> Option<()> {
    if partial.is_complete() {
        out.push(Comparator::new(Op::Eq, partial.floor()));
        return Some(());
    }
    out.push(Comparator::new(Op::Gte, partial.floor()));
    if let Some(ceiling) = wildcard_ceiling(partial)? {
        out.push(Comparator::new(Op::Lt, ceiling));
    }
    Some(())
}

/// Exclusive upper bound implied by the missing components, `None` for `*`
fn wildcard_ceiling(partial: &PartialVersion) -> Option<Option<Version>> {
    let ceiling = match (partial.major, partial.minor) {
        (None, _) => None,
        (Some(major), None) => Some(Version::new(major.checked_add(1)?, 0, 0)),
        (Some(major), Some(minor)) => Some(Version::new(major, minor.checked_add(1)?, 0)),
    };
    Some(ceiling)
}

fn push_caret(partial: &PartialVersion, out: &mut Vec<Comparator>) -> Option<()> {
    out.push(Comparator::new(Op::Gte, partial.floor()));
    // ^1.2.3 -> <2.0.0, ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.0.4, ^0.0 -> <0.1.0, ^0 -> <1.0.0
    let ceiling = match (partial.major, partial.minor, partial.patch) {
        (None, _, _) => return Some(()),
        (Some(major), _, _) if major > 0 => Version::new(major.checked_add(1)?, 0, 0),
        (Some(_), None, _) => Version::new(1, 0, 0),
        (Some(_), Some(minor), _) if minor > 0 => Version::new(0, minor.checked_add(1)?, 0),
        (Some(_), Some(_), None) => Version::new(0, 1, 0),
        (Some(_), Some(_), Some(patch)) => Version::new(0, 0, patch.checked_add(1)?),
    };
    out.push(Comparator::new(Op::Lt, ceiling));
    Some(())
}

fn push_tilde(partial: &PartialVersion, out: &mut Vec<Comparator>) -> Option<()> {
    out.push(Comparator::new(Op::Gte, partial.floor()));
    // ~1.2.3 -> <1.3.0, ~1.2 -> <1.3.0, ~1 -> <2.0.0
    let ceiling = match (partial.major, partial.minor) {
        (None, _) => return Some(()),
        (Some(major), None) => Version::new(major.checked_add(1)?, 0, 0),
        (Some(major), Some(minor)) => Version::new(major, minor.checked_add(1)?, 0),
    };
    out.push(Comparator::new(Op::Lt, ceiling));
    Some(())
}

/// `1.0.0 - 2.0.0` is inclusive on both ends; a partial upper end spans its
/// missing components (`1 - 2` is >=1.0.0 <3.0.0)
fn push_hyphen(from: &str, to: &str, out: &mut Vec<Comparator>) -> Option<()> {
    let from = PartialVersion::parse(from)?;
    let to = PartialVersion::parse(to)?;

    out.push(Comparator::new(Op::Gte, from.floor()));
    if to.is_complete() {
        out.push(Comparator::new(Op::Lte, to.floor()));
    } else if let Some(ceiling) = wildcard_ceiling(&to)? {
        out.push(Comparator::new(Op::Lt, ceiling));
    }
    Some(())
}
