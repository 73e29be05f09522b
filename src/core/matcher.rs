//! Decides whether a single line contains the search pattern.

use super::{MatchMode, SearchOptions};
use regex::Regex;

/// A compiled line predicate for one search invocation.
#[derive(Debug, Clone)]
pub enum LineMatcher {
    Literal(String),
    Word(Regex),
    /// An empty pattern: every line matches, whatever the mode.
    Everything,
    /// A word pattern that could not be compiled matches no line at all.
    Nothing,
}

impl LineMatcher {
    pub fn new(pattern: &str, mode: MatchMode) -> Self {
        if pattern.is_empty() {
            return LineMatcher::Everything;
        }
        match mode {
            MatchMode::Literal => LineMatcher::Literal(pattern.to_string()),
            MatchMode::Word => Self::word(pattern),
        }
    }

    pub fn from_options(options: &SearchOptions) -> Self {
        Self::new(&options.pattern, options.match_mode)
    }

    /// Builds `\b<escaped>\b`. Escaping rules out syntax errors; only the
    /// compiled size limit can still reject a very long pattern.
    fn word(pattern: &str) -> Self {
        let source = format!(r"\b{}\b", regex::escape(pattern));
        match Regex::new(&source) {
            Ok(regex) => LineMatcher::Word(regex),
            Err(e) => {
                tracing::warn!(
                    "Failed to compile word pattern of {} bytes: {}",
                    pattern.len(),
                    e
                );
                LineMatcher::Nothing
            }
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            LineMatcher::Literal(pattern) => line.contains(pattern.as_str()),
            LineMatcher::Word(regex) => regex.is_match(line),
            LineMatcher::Everything => true,
            LineMatcher::Nothing => false,
        }
    }
}

/// One-shot form of [`LineMatcher::is_match`].
pub fn matches(pattern: &str, line: &str, mode: MatchMode) -> bool {
    LineMatcher::new(pattern, mode).is_match(line)
}
