//! Assertions Module
//!
//! Validation of user supplied interpolation delimiters.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static UNUSABLE_INTERPOLATION_REGEXPS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\s*$").unwrap(),      // empty
        Regex::new(r"[<>]").unwrap(),       // html tag
        Regex::new(r"^[{}]$").unwrap(),     // i18n expansion
        Regex::new(r"&(#|[a-z])").unwrap(), // character reference
        Regex::new(r"^//").unwrap(),        // comment
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("Expected '{identifier}' to be an array, [start, end].")]
    NotAPair { identifier: String },
    #[error("['{start}', '{end}'] contains unusable interpolation symbol.")]
    UnusableSymbol { start: String, end: String },
}

pub fn assert_interpolation_symbols(
    identifier: &str,
    value: &[String],
) -> Result<(), InterpolationError> {
    let [start, end] = value else {
        return Err(InterpolationError::NotAPair {
            identifier: identifier.to_string(),
        });
    };

    for regexp in UNUSABLE_INTERPOLATION_REGEXPS.iter() {
        if regexp.is_match(start) || regexp.is_match(end) {
            return Err(InterpolationError::UnusableSymbol {
                start: start.clone(),
                end: end.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(start: &str, end: &str) -> Vec<String> {
        vec![start.to_string(), end.to_string()]
    }

    #[test]
    fn should_accept_custom_delimiters() {
        assert!(assert_interpolation_symbols("interpolation", &pair("[[", "]]")).is_ok());
    }

    #[test]
    fn should_require_exactly_two_entries() {
        let err = assert_interpolation_symbols("interpolation", &["{{".to_string()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected 'interpolation' to be an array, [start, end]."
        );
    }

    #[test]
    fn should_reject_html_like_delimiters() {
        let err = assert_interpolation_symbols("interpolation", &pair("<%", "%>")).unwrap_err();
        assert_eq!(
            err,
            InterpolationError::UnusableSymbol {
                start: "<%".to_string(),
                end: "%>".to_string(),
            }
        );
    }
}
