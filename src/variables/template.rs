//! `{{name}}` placeholder substitution
//!
//! A placeholder is the shortest `{{...}}` span whose name contains no `}`.
//! Names are matched exactly; unknown placeholders are left untouched.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}").expect("Invalid placeholder regex")
});

/// Replace every known `{{name}}` in `input` with its value
pub fn substitute(input: &str, vars: &HashMap<String, String>) -> String {
    if vars.is_empty() {
        return input.to_string();
    }
    let replaced: Cow<'_, str> = PLACEHOLDER_RE.replace_all(input, |cap: &Captures<'_>| {
        match vars.get(&cap[1]) {
            Some(value) => value.clone(),
            None => cap[0].to_string(),
        }
    });
    replaced.into_owned()
}

/// Placeholder names in order of appearance (duplicates kept)
pub fn placeholders(input: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(input)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

/// Check if a string contains `{{name}}` syntax
pub fn has_placeholders(input: &str) -> bool {
    PLACEHOLDER_RE.is_match(input)
}
