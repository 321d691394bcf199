//! Shared utility functions for text handling.
//!
//! ## Helpers
//!
//! - `compile_regex` - Build a static regex without panicking
//! - `titleize` - Turn a path slug into a display title
//! - `today` - Current UTC date in `YYYY-MM-DD` form

use regex::Regex;
use tracing::warn;

// =============================================================================
// Regex
// =============================================================================

/// Compile `pattern`, falling back to a regex that never matches.
///
/// Intended for `LazyLock` statics built from fixed patterns.
pub fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("Invalid built-in pattern '{}': {}", pattern, e);
            // a position cannot be both a word boundary and not one
            match Regex::new(r"\b\B") {
                Ok(fallback) => fallback,
                Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
            }
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Replace `-`/`_` with spaces and capitalize the first letter of every word.
///
/// Letters after the first are left untouched, so `API-docs` becomes `API Docs`.
pub fn titleize(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of `word`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Dates
// =============================================================================

pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("feature-specification"), "Feature Specification");
        assert_eq!(titleize("user_guide"), "User Guide");
        assert_eq!(titleize("API-docs"), "API Docs");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("frame"), "Frame");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_compile_regex_fallback() {
        let re = compile_regex("(unclosed");
        assert!(!re.is_match("(unclosed"));
        assert!(!re.is_match(""));
        assert!(compile_regex(r"\d+").is_match("42"));
    }

    #[test]
    fn test_today_format() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }
}
