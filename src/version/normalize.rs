//! Canonical spacing for version and range literals
//!
//! ```text
//! ">=2.0.0,<3.0.0"          -> ">= 2.0.0, < 3.0.0"
//! ">= 1.0  ,<2||~>3.1"      -> ">= 1.0, < 2 || ~> 3.1"
//! "1.0.0 - 2.0.0"           -> "1.0.0 - 2.0.0"
//! ```
//!
//! Token text is never altered. Comparators (`>=`, `<=`, `>`, `<`, `~>`) are
//! followed by one space, commas by one space, and `||` is surrounded by
//! single spaces. Two adjacent versions, or a version followed by a
//! comparator, stay separated by one space so that no token is merged into
//! its neighbour.

use crate::version::term::{VersionTerm, parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Comparator(&'a str),
    Prefix(&'a str),
    Word(&'a str),
    Comma,
    Or,
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '^' | '~' | '!')
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != ',' && !is_operator_char(c)
}

fn pieces(input: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            break;
        };

        let (piece, len) = if rest.starts_with("||") {
            (Piece::Or, 2)
        } else if first == ',' {
            (Piece::Comma, 1)
        } else if is_operator_char(first) {
            let len = rest.find(|c: char| !is_operator_char(c)).unwrap_or(rest.len());
            let op = &rest[..len];
            match op {
                ">=" | "<=" | ">" | "<" | "~>" => (Piece::Comparator(op), len),
                _ => (Piece::Prefix(op), len),
            }
        } else {
            let len = rest
                .char_indices()
                .skip(1)
                .find(|&(i, c)| !is_word_char(c) || rest[i..].starts_with("||"))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            (Piece::Word(&rest[..len]), len)
        };

        pieces.push(piece);
        rest = &rest[len..];
    }

    pieces
}

/// Canonicalize the spacing of a version or range literal
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut previous: Option<Piece<'_>> = None;

    for piece in pieces(input) {
        let after_word = matches!(previous, Some(Piece::Word(_)));
        match piece {
            Piece::Comparator(op) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(op);
                out.push(' ');
            }
            Piece::Prefix(op) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(op);
            }
            Piece::Word(word) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(word);
            }
            Piece::Comma => {
                if previous == Some(Piece::Comma) {
                    continue;
                }
                out.push_str(", ");
            }
            Piece::Or => out.push_str(" || "),
        }
        previous = Some(piece);
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two literals declare the same thing
///
/// Literals are equivalent when they normalize to the same text, or when
/// both parse to the same exact version (build metadata included) or to
/// structurally equal ranges.
pub fn is_equivalent(a: &str, b: &str) -> bool {
    if normalize(a) == normalize(b) {
        return true;
    }

    match (parse(a), parse(b)) {
        (Ok(VersionTerm::Exact(x)), Ok(VersionTerm::Exact(y))) => x.version() == y.version(),
        (Ok(VersionTerm::Range(x)), Ok(VersionTerm::Range(y))) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(">=2.0.0,<3.0.0", ">= 2.0.0, < 3.0.0")]
    #[case(">= 3.2.2, < 4", ">= 3.2.2, < 4")]
    #[case(">=  1.0.0  ,   <  2.0.0", ">= 1.0.0, < 2.0.0")]
    #[case(">=1.0.0<2.0.0", ">= 1.0.0 < 2.0.0")]
    #[case(">=1.0.0 <2.0.0", ">= 1.0.0 < 2.0.0")]
    #[case(">=1.0.0,<2.0.0||>=3.0.0,<4.0.0", ">= 1.0.0, < 2.0.0 || >= 3.0.0, < 4.0.0")]
    #[case("~>1.2", "~> 1.2")]
    #[case("~>  1.2 , <1.5", "~> 1.2, < 1.5")]
    #[case("1.0.0 - 2.0.0", "1.0.0 - 2.0.0")]
    #[case("^1.2.3", "^1.2.3")]
    #[case("= 1.2.3", "=1.2.3")]
    #[case("  0.4.0-beta+build.7  ", "0.4.0-beta+build.7")]
    #[case(">=1.0.0,,<2.0.0", ">= 1.0.0, < 2.0.0")]
    #[case(">=1.0.0,", ">= 1.0.0,")]
    #[case("", "")]
    fn normalize_spaces_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case(">=2.0.0,<3.0.0")]
    #[case(">= 1.0.0 <1.5.0 ||>= 2.0.0")]
    #[case("~>1.2.3 || ~> 2")]
    #[case("1.0.0 - 2.0.0")]
    #[case(">=1.0.0-rc.1,<=1.0.0+build")]
    #[case("1.x || 3.*")]
    #[case("v1.2.3")]
    fn normalize_is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_keeps_the_meaning() {
        let input = ">=1.0.0 <1.5.0||~>2.1";
        assert_eq!(parse(&normalize(input)), parse(input));
    }

    #[rstest]
    #[case(">=2.0.0,<3.0.0", ">= 2.0.0, < 3.0.0", true)]
    #[case(">= 2, < 3", ">=2.0.0,<3.0.0", true)]
    #[case("~>2.0", ">= 2.0.0, < 3.0.0", true)]
    #[case("v1.2.3", "1.2.3", true)]
    #[case("1.2.3+a", "1.2.3+b", false)]
    #[case("1.2.3", "=1.2.3", false)]
    #[case(">= 2.0.0, < 3.0.0", ">= 2.0.0, < 4.0.0", false)]
    #[case("invalid", "invalid", true)]
    #[case("invalid", "other", false)]
    fn is_equivalent_compares_meaning(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_eq!(is_equivalent(a, b), expected);
        assert_eq!(is_equivalent(b, a), expected);
    }
}
