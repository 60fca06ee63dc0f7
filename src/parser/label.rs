//! Keyword label normalization.
//!
//! Labels are the grouping key for aggregation, so two invocations of
//! the same keyword must normalize identically even when phrased with
//! different BDD connectives or called with different quoted arguments.

use crate::utils::config::BDD_PREFIXES;
use regex::Regex;
use std::sync::OnceLock;

fn quoted_span_re() -> &'static Regex {
    static QUOTED_SPAN_RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy per span: a greedy `'.+'` would swallow everything
    // between the first and last quote when a label carries more than
    // one quoted argument.
    QUOTED_SPAN_RE.get_or_init(|| Regex::new(r"'[^']+'").expect("valid quoted span regex"))
}

/// Normalize a raw keyword label for grouping
///
/// **Public** - applied by the extractor to every raw label
///
/// Strips a leading BDD connective, then collapses every single-quoted
/// argument span to an empty `''` pair.
pub fn normalize_label(raw: &str) -> String {
    elide_quoted_spans(strip_bdd_prefix(raw))
}

/// Strip a leading BDD connective word and its trailing separator
///
/// **Private** - first normalization stage
///
/// Matching is case-insensitive and only inspects the very start of
/// the label; a connective appearing after another word (e.g. a type
/// qualifier prefix) is left alone. Only the first match is stripped.
fn strip_bdd_prefix(label: &str) -> &str {
    for prefix in BDD_PREFIXES {
        if let Some(head) = label.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                // Connective plus one separator character; labels
                // shorter than that normalize to the empty string.
                return label.get(prefix.len() + 1..).unwrap_or("");
            }
        }
    }
    label
}

/// Collapse every single-quoted span to `''`
///
/// **Private** - second normalization stage
fn elide_quoted_spans(label: &str) -> String {
    quoted_span_re().replace_all(label, "''").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_given_prefix() {
        assert_eq!(normalize_label("Given a user"), "a user");
    }

    #[test]
    fn test_strips_when_then_and_prefixes() {
        assert_eq!(normalize_label("When logging in"), "logging in");
        assert_eq!(normalize_label("Then page loads"), "page loads");
        assert_eq!(normalize_label("And session ends"), "session ends");
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        assert_eq!(normalize_label("GIVEN a user"), "a user");
        assert_eq!(normalize_label("wHeN logging in"), "logging in");
    }

    #[test]
    fn test_prefix_only_stripped_at_start() {
        // The type qualifier comes first, so the connective survives
        assert_eq!(normalize_label("setup Given a user"), "setup Given a user");
    }

    #[test]
    fn test_only_first_prefix_stripped() {
        assert_eq!(normalize_label("Given When doubled"), "When doubled");
    }

    #[test]
    fn test_bare_connective_normalizes_to_empty() {
        assert_eq!(normalize_label("Given"), "");
        assert_eq!(normalize_label("And"), "");
    }

    #[test]
    fn test_elides_single_quoted_span() {
        assert_eq!(normalize_label("Given 'alice' logs in"), "'' logs in");
    }

    #[test]
    fn test_elides_every_quoted_span() {
        assert_eq!(
            normalize_label("Transfer from 'alice' to 'bob'"),
            "Transfer from '' to ''"
        );
    }

    #[test]
    fn test_empty_quotes_left_alone() {
        // The span pattern requires at least one character
        assert_eq!(normalize_label("Click '' button"), "Click '' button");
    }

    #[test]
    fn test_label_without_prefix_or_quotes_unchanged() {
        assert_eq!(normalize_label("Open Browser"), "Open Browser");
    }
}
