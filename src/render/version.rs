//! Provider version constraint formatting

use regex::Regex;
use std::sync::LazyLock;

/// A bare version number, optionally prefixed with `v`
#[expect(clippy::expect_used, reason = "The pattern is a literal exercised by the tests below")]
static BARE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+(?:\.\d+){0,2})$").expect("bare version pattern compiles")
});

/// Turn a provider version into a Terraform version constraint
///
/// A bare version such as `1`, `1.0` or `v1.0.2` becomes a pessimistic
/// constraint (`~> 1.0.2`). Anything else, e.g. `>= 1.0, < 2.0`, is
/// already a constraint and is passed through unchanged.
#[must_use]
#[inline]
pub fn version_constraint(version: &str) -> String {
    let version = version.trim();
    if version.is_empty() {
        return String::new();
    }

    let bare = BARE_VERSION
        .captures(version)
        .and_then(|captures| captures.get(1));

    match bare {
        Some(number) => format!("~> {}", number.as_str()),
        None => version.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_versions_become_pessimistic() {
        assert_eq!(version_constraint("1.0.2"), "~> 1.0.2");
        assert_eq!(version_constraint("0.11"), "~> 0.11");
        assert_eq!(version_constraint("2"), "~> 2");
        assert_eq!(version_constraint("v1.2.3"), "~> 1.2.3");
    }

    #[test]
    fn constraints_pass_through() {
        assert_eq!(version_constraint("~> 0.9"), "~> 0.9");
        assert_eq!(version_constraint(">= 1.0, < 2.0"), ">= 1.0, < 2.0");
        assert_eq!(version_constraint("= 1.0.2"), "= 1.0.2");
        assert_eq!(version_constraint("1.0.2-beta"), "1.0.2-beta");
    }

    #[test]
    fn bare_version_pattern_compiles() {
        assert!(BARE_VERSION.is_match("1.0.2"));
        assert!(!BARE_VERSION.is_match("1.0.2.3"));
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(version_constraint(""), "");
        assert_eq!(version_constraint("   "), "");
    }
}
