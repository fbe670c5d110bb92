//! Interest profile matching.
//!
//! Terms match as case-insensitive substrings of the search blob. No
//! tokenization or stemming; configure term variants explicitly.

use crate::types::config::InterestProfile;

/// Whether a lowercase search blob satisfies the profile.
///
/// Conjunction of four predicates, each vacuously true for an empty list:
/// some role term, some include term, no exclude term, and (when `us_only`
/// is set) some geography signal.
pub fn matches(blob: &str, profile: &InterestProfile) -> bool {
    mismatch_reason(blob, profile).is_none()
}

/// The first predicate a blob fails, if any.
pub fn mismatch_reason(blob: &str, profile: &InterestProfile) -> Option<Mismatch> {
    if !any_contains(blob, &profile.role_any_of) {
        return Some(Mismatch::Role);
    }
    if !any_contains(blob, &profile.include_any_of) {
        return Some(Mismatch::Include);
    }
    if !none_contains(blob, &profile.exclude_any_of) {
        return Some(Mismatch::Excluded);
    }
    if profile.us_only && !any_contains(blob, &profile.us_signals_any_of) {
        return Some(Mismatch::Geography);
    }
    None
}

/// Which predicate rejected a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    Role,
    Include,
    Excluded,
    Geography,
}

impl Mismatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mismatch::Role => "no role term",
            Mismatch::Include => "no include term",
            Mismatch::Excluded => "excluded term",
            Mismatch::Geography => "no geography signal",
        }
    }
}

/// True when `terms` is empty or any term occurs in `blob`.
pub fn any_contains(blob: &str, terms: &[String]) -> bool {
    terms.is_empty() || terms.iter().any(|t| blob.contains(&t.to_lowercase()))
}

/// True when no term occurs in `blob`.
pub fn none_contains(blob: &str, terms: &[String]) -> bool {
    !terms.iter().any(|t| blob.contains(&t.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::Window;
    use proptest::prelude::*;

    fn profile() -> InterestProfile {
        InterestProfile::new(Window::parse("1h").unwrap())
    }

    #[test]
    fn test_empty_profile_matches_anything() {
        assert!(matches("", &profile()));
        assert!(matches("barista in paris", &profile()));
    }

    #[test]
    fn test_role_terms_case_insensitive() {
        let p = profile().with_roles(["Engineer", "Developer"]);
        assert!(matches("senior engineer", &p));
        assert!(matches("web developer", &p));
        assert_eq!(mismatch_reason("product manager", &p), Some(Mismatch::Role));
    }

    #[test]
    fn test_include_is_independent_of_role() {
        let p = profile().with_roles(["engineer"]).with_includes(["rust"]);
        assert!(matches("rust engineer", &p));
        assert_eq!(mismatch_reason("go engineer", &p), Some(Mismatch::Include));
    }

    #[test]
    fn test_exclude_wins() {
        let p = profile().with_roles(["engineer"]).with_excludes(["Intern"]);
        assert!(matches("senior engineer", &p));
        assert_eq!(
            mismatch_reason("engineering intern", &p),
            Some(Mismatch::Excluded)
        );
    }

    #[test]
    fn test_geography_only_when_us_only_with_signals() {
        let mut p = profile().us_only(["united states", "remote - us"]);
        assert!(matches("engineer, remote - us", &p));
        assert_eq!(mismatch_reason("engineer, berlin", &p), Some(Mismatch::Geography));

        p.us_only = false;
        assert!(matches("engineer, berlin", &p));

        let no_signals = InterestProfile {
            us_only: true,
            ..profile()
        };
        assert!(matches("engineer, berlin", &no_signals));
    }

    #[test]
    fn test_substring_not_token_match() {
        let p = profile().with_roles(["engineer"]);
        assert!(matches("engineering manager", &p));
    }

    proptest! {
        #[test]
        fn prop_empty_lists_are_vacuous(blob in ".*") {
            prop_assert!(any_contains(&blob, &[]));
            prop_assert!(none_contains(&blob, &[]));
            prop_assert!(matches(&blob.to_lowercase(), &profile()));
        }

        #[test]
        fn prop_empty_role_list_ignores_blob(blob in "[a-z ]{0,40}", exclude in "[a-z]{3,8}") {
            let p = profile().with_excludes([exclude.clone()]);
            prop_assert_eq!(matches(&blob, &p), !blob.contains(&exclude));
        }
    }
}
