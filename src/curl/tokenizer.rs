//! Shell-like tokenizer for curl command text
//!
//! Handles single and double quotes and backslash escapes. It is not a
//! shell: there is no variable expansion, globbing or command substitution.

use once_cell::sync::Lazy;
use regex::Regex;

/// Backslash-newline continuation plus the whitespace around it
static CONTINUATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\\[ \t]*\r?\n\s*").expect("Invalid continuation regex")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// Collapse line continuations and whitespace runs into single spaces
pub fn normalize(cmd: &str) -> String {
    let joined = CONTINUATION_RE.replace_all(cmd.trim(), " ");
    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

/// Split a curl command into argument tokens
///
/// An escaped character is always taken literally, so `\"` inside a
/// double-quoted string does not end the string. Unterminated quotes are
/// not an error: whatever was accumulated becomes the last token.
pub fn tokenize(cmd: &str) -> Vec<String> {
    let normalized = normalize(cmd);
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in normalized.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }

        match (c, quote) {
            ('\\', _) => escaped = true,
            ('\'' | '"', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (' ', None) => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
