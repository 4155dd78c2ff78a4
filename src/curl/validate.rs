//! Structural pre-check for curl command text
//!
//! Cheap checks meant for UI feedback before a full parse. All checks run
//! and every violation is reported.

use thiserror::Error;

pub const COMMAND_KEYWORD: &str = "curl";

/// Shortest trimmed input considered plausible (heuristic)
pub const MIN_COMMAND_LENGTH: usize = 10;

/// A structural problem found by [`validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("No command text provided")]
    MissingInput,

    #[error("Command is empty")]
    Empty,

    #[error("Command must start with 'curl'")]
    WrongKeyword,

    #[error("Command is too short to be a valid curl command")]
    TooShort,
}

/// Check raw command text; an empty list means it may be parsed
///
/// `None` stands for "no text at all" and only reports
/// [`StructuralError::MissingInput`], since the text checks have nothing to
/// look at.
pub fn validate<'a>(raw: impl Into<Option<&'a str>>) -> Vec<StructuralError> {
    let Some(raw) = raw.into() else {
        return vec![StructuralError::MissingInput];
    };

    let trimmed = raw.trim();
    let mut violations = Vec::new();

    if trimmed.is_empty() {
        violations.push(StructuralError::Empty);
    }
    if !starts_with_keyword(trimmed) {
        violations.push(StructuralError::WrongKeyword);
    }
    if trimmed.chars().count() < MIN_COMMAND_LENGTH {
        violations.push(StructuralError::TooShort);
    }

    violations
}

/// Case-insensitive keyword prefix check on already-trimmed text
pub fn starts_with_keyword(trimmed: &str) -> bool {
    trimmed
        .get(..COMMAND_KEYWORD.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(COMMAND_KEYWORD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_command() {
        assert!(validate("curl https://example.com").is_empty());
        assert!(validate("  CURL https://example.com  ").is_empty());
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(validate(None::<&str>), vec![StructuralError::MissingInput]);
    }

    #[test]
    fn test_empty_reports_every_violation() {
        assert_eq!(
            validate("   "),
            vec![StructuralError::Empty, StructuralError::WrongKeyword, StructuralError::TooShort]
        );
    }

    #[test]
    fn test_wrong_keyword() {
        assert_eq!(validate("wget https://example.com"), vec![StructuralError::WrongKeyword]);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(validate("curl x.io"), vec![StructuralError::TooShort]);
    }

    #[test]
    fn test_keyword_prefix_with_multibyte_text() {
        assert!(!starts_with_keyword("cü"));
        assert!(!starts_with_keyword("ñcurl"));
    }
}
