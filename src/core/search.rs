//! Runs a search over a `SourceProvider` and emits matches in display order.

use super::{
    CommentFilter, ContextLine, ContextPosition, ContextWindow, CoreError, Highlighter, LineMatcher,
    MatchRecord, SearchOptions, SourceFile, SourceProvider,
};

/// One emission of a search, in the order the presentation layer should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    ContextBefore(ContextLine),
    Match(MatchRecord),
    ContextAfter(ContextLine),
}

/// Receives search emissions. Fire-and-forget.
pub trait SearchSink {
    fn emit(&mut self, event: SearchEvent);
}

impl SearchSink for Vec<SearchEvent> {
    fn emit(&mut self, event: SearchEvent) {
        self.push(event);
    }
}

impl<F: FnMut(SearchEvent)> SearchSink for F {
    fn emit(&mut self, event: SearchEvent) {
        self(event)
    }
}

/// Counters for one search invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub files_searched: usize,
    pub files_skipped: usize,
    pub matches: usize,
}

impl SearchSummary {
    pub fn is_not_found(&self) -> bool {
        self.matches == 0
    }
}

/// The message shown when a search produced no matches.
pub fn not_found_message(pattern: &str) -> String {
    format!("The word \"{}\" has not been found", pattern)
}

/// A utility struct for searching file contents.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    filter: CommentFilter,
    highlighter: Highlighter,
}

impl SearchEngine {
    pub fn new(filter: CommentFilter, highlighter: Highlighter) -> Self {
        Self {
            filter,
            highlighter,
        }
    }

    /// Searches every source of `provider` and emits results into `sink`.
    ///
    /// Per-file failures are logged and counted, never returned.
    pub fn search(
        &self,
        provider: &dyn SourceProvider,
        options: &SearchOptions,
        sink: &mut dyn SearchSink,
    ) -> SearchSummary {
        let matcher = LineMatcher::from_options(options);
        let mut summary = SearchSummary::default();

        for source in provider.sources() {
            let text = match provider.load(&source) {
                Ok(text) => text,
                Err(e) => {
                    Self::log_skip(&e);
                    summary.files_skipped += 1;
                    continue;
                }
            };
            summary.files_searched += 1;
            summary.matches += self.search_text(&source, &text, &matcher, options, sink);
        }

        tracing::debug!(
            "Search for {:?}: {} matches in {} files ({} skipped)",
            options.pattern,
            summary.matches,
            summary.files_searched,
            summary.files_skipped
        );
        summary
    }

    /// Convenience wrapper collecting every emission.
    pub fn search_collect(
        &self,
        provider: &dyn SourceProvider,
        options: &SearchOptions,
    ) -> (Vec<SearchEvent>, SearchSummary) {
        let mut events: Vec<SearchEvent> = Vec::new();
        let summary = self.search(provider, options, &mut events);
        (events, summary)
    }

    /// Searches one file's text. The line array is built once and shared by
    /// every context window in the file.
    fn search_text(
        &self,
        source: &SourceFile,
        text: &str,
        matcher: &LineMatcher,
        options: &SearchOptions,
        sink: &mut dyn SearchSink,
    ) -> usize {
        let lines: Vec<&str> = text.lines().collect();
        let context_size = if options.show_context {
            options.context_line_count
        } else {
            0
        };
        let mut found = 0;

        for (index, line) in lines.iter().enumerate() {
            if !matcher.is_match(line)
                || !self
                    .filter
                    .allows(line, options.include_lines_with_excluded_characters)
            {
                continue;
            }

            let line_number = index + 1;
            let window = ContextWindow::around(&lines, line_number, context_size);

            for (number, text) in window.before {
                sink.emit(SearchEvent::ContextBefore(ContextLine {
                    source: source.clone(),
                    line_number: number,
                    text,
                    position: ContextPosition::Before,
                }));
            }

            let highlighted = options
                .highlight
                .then(|| self.highlighter.highlight(line, &options.pattern));
            sink.emit(SearchEvent::Match(MatchRecord {
                source: source.clone(),
                line_number,
                text: line.to_string(),
                highlighted,
            }));

            for (number, text) in window.after {
                sink.emit(SearchEvent::ContextAfter(ContextLine {
                    source: source.clone(),
                    line_number: number,
                    text,
                    position: ContextPosition::After,
                }));
            }

            found += 1;
        }

        found
    }

    fn log_skip(error: &CoreError) {
        match error {
            CoreError::FileAccessDenied(path) => {
                tracing::debug!("Permission denied for {}", path.display())
            }
            CoreError::TextDecode(path) => tracing::debug!("Cannot read {} file", path.display()),
            other => tracing::debug!("Skipping file: {}", other),
        }
    }
}
