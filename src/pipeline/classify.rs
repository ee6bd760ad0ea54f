//! Title relevance classification.
//!
//! One shared engine evaluates every site's declarative rules, so the
//! contract stays testable in isolation from markup scraping. All string
//! comparisons are case-insensitive via plain `to_lowercase`.

use crate::models::TitleRules;

/// Classifier combining the global exclude list with per-site rules.
pub struct TitleClassifier {
    excluded: Vec<String>,
}

impl TitleClassifier {
    /// Build a classifier from the global exclude tokens.
    pub fn new(excluded_tokens: &[String]) -> Self {
        Self {
            excluded: excluded_tokens
                .iter()
                .map(|t| t.to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Decide whether a title is in scope for a site.
    ///
    /// Order of evaluation: global excludes, then the site's deny tokens,
    /// then its positive pattern (required substring and/or allowed
    /// prefixes). Deny always wins over allow.
    pub fn classify(&self, rules: &TitleRules, title: &str) -> bool {
        let lower = title.to_lowercase();

        if self.excluded.iter().any(|t| lower.contains(t.as_str())) {
            return false;
        }
        if rules
            .deny_tokens
            .iter()
            .any(|t| lower.contains(&t.to_lowercase()))
        {
            return false;
        }
        if let Some(required) = &rules.require_substring {
            if !lower.contains(&required.to_lowercase()) {
                return false;
            }
        }
        if !rules.allow_prefixes.is_empty()
            && !rules
                .allow_prefixes
                .iter()
                .any(|p| lower.starts_with(&p.to_lowercase()))
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TitleClassifier {
        TitleClassifier::new(&["intern".to_string(), "director".to_string()])
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let rules = TitleRules {
            require_substring: Some("engineer".to_string()),
            ..TitleRules::default()
        };
        let c = classifier();

        assert!(c.classify(&rules, "Software Engineer"));
        assert!(c.classify(&rules, "SOFTWARE ENGINEER"));
        assert!(c.classify(&rules, "software engineer"));
        assert!(!c.classify(&rules, "Trading Analyst"));
    }

    #[test]
    fn test_global_excludes_apply_to_every_rule_set() {
        let c = classifier();

        assert!(!c.classify(&TitleRules::default(), "Software Engineering Intern"));
        assert!(!c.classify(&TitleRules::default(), "Engineering Director"));
        assert!(c.classify(&TitleRules::default(), "Software Engineer"));
    }

    #[test]
    fn test_deny_tokens_beat_allow_prefixes() {
        let rules = TitleRules {
            deny_tokens: vec!["senior".to_string()],
            allow_prefixes: vec!["software engineer ii".to_string()],
            require_substring: None,
        };
        let c = classifier();

        // Matches an allowed prefix and a denied token at once.
        assert!(!c.classify(&rules, "Senior Software Engineer II"));
        assert!(c.classify(&rules, "Software Engineer II"));
    }

    #[test]
    fn test_allow_prefixes_require_a_match_when_present() {
        let rules = TitleRules {
            allow_prefixes: vec![
                "software engineer".to_string(),
                "graduate software engineer".to_string(),
            ],
            ..TitleRules::default()
        };
        let c = classifier();

        assert!(c.classify(&rules, "Software Engineer, Core Platform"));
        assert!(c.classify(&rules, "Graduate Software Engineer"));
        assert!(!c.classify(&rules, "Staff Software Architect"));
        // Prefix means prefix, not containment.
        assert!(!c.classify(&rules, "Junior Software Engineer"));
    }

    #[test]
    fn test_empty_rules_accept_everything_not_excluded() {
        let c = classifier();
        assert!(c.classify(&TitleRules::default(), "Quantitative Researcher"));
    }

    #[test]
    fn test_require_substring_and_prefixes_combine() {
        let rules = TitleRules {
            deny_tokens: vec![],
            allow_prefixes: vec!["software engineer".to_string()],
            require_substring: Some("platform".to_string()),
        };
        let c = classifier();

        assert!(c.classify(&rules, "Software Engineer, Platform"));
        assert!(!c.classify(&rules, "Software Engineer, Payments"));
    }
}
