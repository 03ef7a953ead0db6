//! Name matching for pattern filters.
//!
//! Patterns written as `/body/flags` compile to a regular expression, any
//! other text is a case-insensitive substring. Pattern text comes straight
//! from the user, so [`PatternMatcher::compile`] never fails: an invalid
//! expression turns into a matcher that matches nothing and a warning in
//! the log.
//!
//! Expressions use the syntax of the `regex` crate, which is stricter than
//! JavaScript's `RegExp`. Lookaround (`(?=`, `(?!`, `(?<=`, `(?<!`) and
//! backreferences are not supported, and a `{` that does not start a
//! repetition must be escaped. Such patterns fail to compile and therefore
//! match nothing.

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::warn;

/// Why a `/body/flags` pattern could not be compiled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unsupported regex flag '{0}'")]
    UnknownFlag(char),
    #[error("regex flag '{0}' given more than once")]
    DuplicateFlag(char),
    #[error("invalid regex: {0}")]
    Syntax(String),
}

/// Compiled form of a pattern filter's text.
#[derive(Debug, Clone)]
pub enum PatternMatcher {
    Regex(Regex),
    /// Lowercased needle.
    Substring(String),
    Never,
}

impl PatternMatcher {
    /// Compiles a pattern, falling back to [`PatternMatcher::Never`] when the
    /// regex is malformed.
    pub fn compile(pattern: &str) -> Self {
        match Self::try_compile(pattern) {
            Ok(matcher) => matcher,
            Err(error) => {
                warn!(pattern = %pattern, %error, "invalid pattern, matching nothing");
                PatternMatcher::Never
            }
        }
    }

    /// Compiles a pattern, reporting malformed regexes.
    pub fn try_compile(pattern: &str) -> Result<Self, PatternError> {
        match split_regex(pattern) {
            Some((body, flags)) => build_regex(body, flags).map(PatternMatcher::Regex),
            None => Ok(PatternMatcher::Substring(pattern.to_lowercase())),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            PatternMatcher::Regex(regex) => regex.is_match(text),
            PatternMatcher::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            PatternMatcher::Never => false,
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, PatternMatcher::Regex(_))
    }
}

/// Returns true when the pattern uses the `/body/flags` regex form.
pub fn is_regex_pattern(pattern: &str) -> bool {
    split_regex(pattern).is_some()
}

fn split_regex(pattern: &str) -> Option<(&str, &str)> {
    if !pattern.starts_with('/') {
        return None;
    }
    let last_slash = pattern.rfind('/')?;
    if last_slash == 0 {
        return None;
    }
    Some((&pattern[1..last_slash], &pattern[last_slash + 1..]))
}

fn build_regex(body: &str, flags: &str) -> Result<Regex, PatternError> {
    let mut builder = RegexBuilder::new(body);
    let mut seen = Vec::with_capacity(flags.len());
    for flag in flags.chars() {
        if seen.contains(&flag) {
            return Err(PatternError::DuplicateFlag(flag));
        }
        seen.push(flag);
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            // Unicode is always on; global, sticky and indices have no
            // meaning for a single stateless test.
            'u' | 'v' | 'g' | 'y' | 'd' => {}
            other => return Err(PatternError::UnknownFlag(other)),
        }
    }
    builder
        .build()
        .map_err(|error| PatternError::Syntax(error.to_string()))
}
