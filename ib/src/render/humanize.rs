//! Key humanizer

use std::sync::LazyLock;

use regex::Regex;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Convert a machine-style key into a title
///
/// `techStack` and `tech_stack` both become `Tech stack`; `apiV2Endpoints`
/// becomes `Api V2 Endpoints`. Leading and trailing whitespace is collapsed,
/// not trimmed.
pub fn humanize(key: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(key, "$1 $2");
    let spaced = split.replace('_', " ");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() => first.to_uppercase().chain(chars).collect(),
        _ => collapsed.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(humanize("tech_stack"), "Tech stack");
        assert_eq!(humanize("risk__assessment"), "Risk assessment");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(humanize("techStack"), "Tech Stack");
        assert_eq!(humanize("apiV2Endpoints"), "Api V2 Endpoints");
        assert_eq!(humanize("phase1Goals"), "Phase1 Goals");
    }

    #[test]
    fn test_acronym_run_is_not_split() {
        assert_eq!(humanize("HTTPServer"), "HTTPServer");
        assert_eq!(humanize("useHTTP"), "Use HTTP");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(humanize("architecture"), "Architecture");
        assert_eq!(humanize("Frontend"), "Frontend");
    }

    #[test]
    fn test_leading_separator_is_kept_as_space() {
        assert_eq!(humanize("_id"), " id");
        assert_eq!(humanize("  spaced   out "), " spaced out ");
    }

    #[test]
    fn test_empty() {
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_already_humanized() {
        assert_eq!(humanize("Tech stack"), "Tech stack");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn prop_idempotent(key in "[a-zA-Z0-9_ ]{0,32}") {
            let once = humanize(&key);
            prop_assert_eq!(humanize(&once), once);
        }

        #[test]
        fn prop_no_underscores_survive(key in "[a-zA-Z0-9_]{0,32}") {
            prop_assert!(!humanize(&key).contains('_'));
        }
    }
}
