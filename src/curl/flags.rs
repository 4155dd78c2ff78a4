//! Flag dispatch table for the curl parser
//!
//! Every recognized flag maps to a [`FlagAction`] carrying its value arity.
//! Anything not in the table goes through [`lookup`]'s unknown-flag rule.

/// What a recognized flag does to the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    Method,
    Header,
    Data,
    Form,
    MaxTime,
    MaxRedirects,
    FollowRedirects,
    /// Accepted and ignored (`-v`, `-s`, `-S`)
    Ignore,
}

impl FlagAction {
    /// Number of tokens consumed after the flag itself
    pub fn arity(self) -> usize {
        match self {
            FlagAction::Method
            | FlagAction::Header
            | FlagAction::Data
            | FlagAction::Form
            | FlagAction::MaxTime
            | FlagAction::MaxRedirects => 1,
            FlagAction::FollowRedirects | FlagAction::Ignore => 0,
        }
    }
}

/// Result of looking a flag up in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Known(FlagAction),
    /// Unknown `--long` flag; may swallow the next token as its value
    UnknownLong,
    /// Unknown short flag; never consumes a value
    UnknownShort,
}

pub const FLAG_TABLE: &[(&str, FlagAction)] = &[
    ("-X", FlagAction::Method),
    ("--request", FlagAction::Method),
    ("-H", FlagAction::Header),
    ("--header", FlagAction::Header),
    ("-d", FlagAction::Data),
    ("--data", FlagAction::Data),
    ("--data-raw", FlagAction::Data),
    ("-F", FlagAction::Form),
    ("--form", FlagAction::Form),
    ("--max-time", FlagAction::MaxTime),
    ("--max-redirs", FlagAction::MaxRedirects),
    ("-L", FlagAction::FollowRedirects),
    ("--location", FlagAction::FollowRedirects),
    ("-v", FlagAction::Ignore),
    ("--verbose", FlagAction::Ignore),
    ("-s", FlagAction::Ignore),
    ("--silent", FlagAction::Ignore),
    ("-S", FlagAction::Ignore),
    ("--show-error", FlagAction::Ignore),
];

/// Look up a token that starts with `-`; matching is exact and case-sensitive
pub fn lookup(flag: &str) -> Dispatch {
    FLAG_TABLE
        .iter()
        .find(|(name, _)| *name == flag)
        .map(|(_, action)| Dispatch::Known(*action))
        .unwrap_or_else(|| {
            if flag.starts_with("--") {
                Dispatch::UnknownLong
            } else {
                Dispatch::UnknownShort
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_share_action() {
        assert_eq!(lookup("-X"), lookup("--request"));
        assert_eq!(lookup("--data-raw"), Dispatch::Known(FlagAction::Data));
        assert_eq!(lookup("-S"), Dispatch::Known(FlagAction::Ignore));
    }

    #[test]
    fn test_unknown_flags() {
        assert_eq!(lookup("--compressed"), Dispatch::UnknownLong);
        assert_eq!(lookup("-k"), Dispatch::UnknownShort);
        assert_eq!(lookup("-x"), Dispatch::UnknownShort);
    }

    #[test]
    fn test_arity() {
        assert_eq!(FlagAction::Header.arity(), 1);
        assert_eq!(FlagAction::FollowRedirects.arity(), 0);
        assert_eq!(FlagAction::Ignore.arity(), 0);
    }
}
