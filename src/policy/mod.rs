//! Content policy enforcement.
//!
//! # Data Flow
//! ```text
//! request body "text" field (arbitrary JSON)
//!     → type/length check   → Rejection::Invalid
//!     → forbidden substring → Rejection::Forbidden(code)
//!     → keyword allow-list  → Rejection::NotAllowed
//!     → &str accepted for forwarding
//! ```
//!
//! # Design Decisions
//! - Policy is configuration data (two string sets + a bound), not control flow
//! - The forbidden check runs before the allow-list so a forbidden message
//!   gets the more specific rejection even when it also matches a keyword
//! - Keyword matching is case-insensitive; forbidden matching is exact

use serde_json::Value;

use crate::config::PolicyConfig;

/// Why a message was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Text absent, not a string, empty, or over the length bound.
    Invalid,
    /// Text contains this forbidden substring.
    Forbidden(String),
    /// Text matched no allow-list keyword.
    NotAllowed,
}

/// Compiled content policy. Built once at startup, immutable after.
pub struct ContentPolicy {
    forbidden: Vec<String>,
    allowed_lower: Vec<String>,
    max_len: usize,
}

impl ContentPolicy {
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            forbidden: config.forbidden_substrings.clone(),
            allowed_lower: config
                .allowed_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            max_len: config.max_text_length,
        }
    }

    /// Validate the raw `text` field of an incoming request.
    ///
    /// Returns the accepted text on success. Checks run in a fixed order:
    /// type/length, forbidden substrings, keyword allow-list.
    pub fn validate<'a>(&self, text: Option<&'a Value>) -> Result<&'a str, Rejection> {
        let text = text.and_then(Value::as_str).ok_or(Rejection::Invalid)?;
        if text.is_empty() || text.chars().count() > self.max_len {
            return Err(Rejection::Invalid);
        }

        for code in &self.forbidden {
            if text.contains(code.as_str()) {
                return Err(Rejection::Forbidden(code.clone()));
            }
        }

        let lowered = text.to_lowercase();
        if !self
            .allowed_lower
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            return Err(Rejection::NotAllowed);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy() -> ContentPolicy {
        ContentPolicy::new(&PolicyConfig::default())
    }

    #[test]
    fn accepts_task_message() {
        let text = json!("New Task Accepted: Job TTV #42");
        assert_eq!(
            policy().validate(Some(&text)),
            Ok("New Task Accepted: Job TTV #42")
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let text = json!("MICROWORKERS payout processed");
        assert!(policy().validate(Some(&text)).is_ok());
    }

    #[test]
    fn rejects_missing_or_non_string_text() {
        assert_eq!(policy().validate(None), Err(Rejection::Invalid));

        let number = json!(42);
        assert_eq!(policy().validate(Some(&number)), Err(Rejection::Invalid));

        let empty = json!("");
        assert_eq!(policy().validate(Some(&empty)), Err(Rejection::Invalid));
    }

    #[test]
    fn rejects_over_length_even_with_keyword() {
        let long = json!(format!("Job TTV {}", "x".repeat(2000)));
        assert_eq!(policy().validate(Some(&long)), Err(Rejection::Invalid));
    }

    #[test]
    fn length_bound_is_inclusive() {
        let config = PolicyConfig {
            max_text_length: 10,
            ..PolicyConfig::default()
        };
        let policy = ContentPolicy::new(&config);

        let at_limit = json!("Job TTV #1");
        assert!(policy.validate(Some(&at_limit)).is_ok());
    }

    #[test]
    fn forbidden_code_blocks_before_keyword_check() {
        // Matches the "mw data allart" keyword but carries the blocked code,
        // so it must get the more specific rejection.
        let text = json!("mw data allart 1532");
        assert_eq!(
            policy().validate(Some(&text)),
            Err(Rejection::Forbidden("1532".to_string()))
        );
    }

    #[test]
    fn forbidden_match_is_case_sensitive_substring() {
        let text = json!("Job TTV ref 15320");
        // "1532" appears inside "15320"; substring semantics block it.
        assert_eq!(
            policy().validate(Some(&text)),
            Err(Rejection::Forbidden("1532".to_string()))
        );
    }

    #[test]
    fn rejects_text_without_keyword() {
        let text = json!("hello world");
        assert_eq!(policy().validate(Some(&text)), Err(Rejection::NotAllowed));
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let config = PolicyConfig {
            allowed_keywords: vec![],
            ..PolicyConfig::default()
        };
        let policy = ContentPolicy::new(&config);

        let text = json!("New Task Accepted");
        assert_eq!(policy.validate(Some(&text)), Err(Rejection::NotAllowed));
    }
}
