pub mod context;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod matcher;
pub mod scanner;
pub mod search;
pub mod source;

use std::path::{Path, PathBuf};

/// A user-designated directory (or single file) to include in a search.
///
/// This is a plain value object; the presentation layer binds it to whatever
/// control it uses to toggle `included`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
    pub name: String,
    pub path: PathBuf,
    pub included: bool,
}

impl SearchRoot {
    /// Creates a root named after the last component of `path`.
    pub fn new(path: impl Into<PathBuf>, included: bool) -> Self {
        let path = path.into();
        let name = display_name_of(&path);
        Self {
            name,
            path,
            included,
        }
    }

    /// Creates a root whose name is not derived from its path, e.g. a remote repository.
    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>, included: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            included,
        }
    }
}

/// Where a `SourceFile` was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    Local,
    Remote { repository: String },
}

/// A file eligible for searching.
///
/// Identity is the full `path`; `display_name` is the bare file name and is
/// only used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    pub path: PathBuf,
    pub display_name: String,
    pub root_name: String,
    pub origin: SourceOrigin,
}

impl SourceFile {
    pub fn local(path: impl Into<PathBuf>, root_name: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display_name: display_name_of(&path),
            path,
            root_name: root_name.into(),
            origin: SourceOrigin::Local,
        }
    }

    pub fn remote(path: impl Into<PathBuf>, repository: impl Into<String>) -> Self {
        let path = path.into();
        let repository = repository.into();
        Self {
            display_name: display_name_of(&path),
            path,
            root_name: repository.clone(),
            origin: SourceOrigin::Remote { repository },
        }
    }
}

/// How the search pattern is compared against a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-sensitive substring containment.
    #[default]
    Literal,
    /// The pattern is escaped and searched as a whole word (`\b...\b`).
    /// Named "Regex" in the interface, but users cannot supply a free-form regex.
    Word,
}

/// Options for a single search invocation. Immutable while the search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: String,
    pub match_mode: MatchMode,
    /// When `true`, lines containing an excluded character (comments, paths) are shown.
    pub include_lines_with_excluded_characters: bool,
    pub show_context: bool,
    pub context_line_count: usize,
    pub highlight: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            match_mode: MatchMode::Literal,
            include_lines_with_excluded_characters: true,
            show_context: false,
            context_line_count: 2,
            highlight: false,
        }
    }
}

impl SearchOptions {
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn word(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            match_mode: MatchMode::Word,
            ..Default::default()
        }
    }
}

/// One reported line match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub source: SourceFile,
    /// 1-based.
    pub line_number: usize,
    pub text: String,
    pub highlighted: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPosition {
    Before,
    After,
}

/// A line shown around a match for readability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub source: SourceFile,
    pub line_number: usize,
    pub text: String,
    pub position: ContextPosition,
}

/// Returns the last path component as a `String`, or the whole path if it has none.
pub fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub use context::ContextWindow;
pub use error::CoreError;
pub use filter::CommentFilter;
pub use highlight::Highlighter;
pub use matcher::LineMatcher;
pub use scanner::{EnumerationRules, SourceScanner};
pub use search::{SearchEngine, SearchEvent, SearchSink, SearchSummary};
pub use source::{LocalSource, SourceProvider};
