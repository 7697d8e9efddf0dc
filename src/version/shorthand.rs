//! Terraform-style `~>` shorthand expansion
//!
//! `~>X[.Y[.Z]]` expands to `>=X.Y.Z, <(X+1).0.0`, anywhere in the input:
//! inside `||` lists and next to other comparators.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::version::error::ParseError;
use crate::version::semver::PartialVersion;

static TILDE_ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~>\s*([^\s,|<>=~^]*)").expect("valid ~> pattern"));

/// Replace every `~>` token in `input` with its explicit range.
///
/// Input without `~>` is returned unchanged.
pub fn expand_shorthand(input: &str) -> Result<String, ParseError> {
    let mut expanded = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TILDE_ARROW.captures_iter(input) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expanded.push_str(&input[last..whole.start()]);
        expanded.push_str(&expand_token(token.as_str())?);
        last = whole.end();
    }

    expanded.push_str(&input[last..]);
    Ok(expanded)
}

fn expand_token(token: &str) -> Result<String, ParseError> {
    let invalid = |reason| ParseError::InvalidShorthandToken {
        token: token.to_string(),
        reason,
    };

    if token.is_empty() {
        return Err(invalid("missing version"));
    }

    let core = token.split(['-', '+']).next().unwrap_or(token);
    let components = core.split('.').count();
    if components > 3 {
        return Err(invalid("more than three components"));
    }

    // Wildcards parse as missing components, so they show up as lost precision
    let partial = PartialVersion::parse(token)
        .filter(|p| p.precision() == components)
        .ok_or_else(|| invalid("not a numeric version"))?;

    let floor = partial.floor();
    let next_major = floor
        .major
        .checked_add(1)
        .ok_or_else(|| invalid("major component out of range"))?;

    Ok(format!(">={floor}, <{}", Version::new(next_major, 0, 0)))
}
