//! Search entry points used by the presentation layer.
//!
//! These wrap the engine with the dev-mode timing and resolve which roots
//! and provider to use. Searches run to completion on the calling thread.

use std::time::Duration;

use super::state::SearchSession;
use crate::core::{
    EnumerationRules, LocalSource, SearchEngine, SearchOptions, SearchRoot, SearchSink,
    SearchSummary, SourceProvider, SourceScanner,
};
use crate::remote::{RemoteRepository, RemoteSource};
use crate::utils::timing::timed;

/// What a finished search reports back besides its emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub summary: SearchSummary,
    /// Only measured in dev mode.
    pub elapsed: Option<Duration>,
}

impl SearchOutcome {
    pub fn is_not_found(&self) -> bool {
        self.summary.is_not_found()
    }
}

fn run(
    engine: &SearchEngine,
    provider: &dyn SourceProvider,
    options: &SearchOptions,
    sink: &mut dyn SearchSink,
    dev_mode: bool,
    label: &str,
) -> SearchOutcome {
    let (summary, elapsed) = timed(dev_mode, label, || engine.search(provider, options, sink));
    if summary.is_not_found() {
        tracing::info!("The word {:?} has not been found", options.pattern);
    }
    SearchOutcome { summary, elapsed }
}

/// Searches the included local roots of `session`.
pub fn search_local(
    session: &SearchSession,
    engine: &SearchEngine,
    options: &SearchOptions,
    sink: &mut dyn SearchSink,
) -> SearchOutcome {
    search_roots(
        &session.included_roots(),
        &SourceScanner::default(),
        engine,
        options,
        sink,
        session.settings.dev_mode,
    )
}

/// Searches explicit local roots with a custom scanner.
pub fn search_roots(
    roots: &[SearchRoot],
    scanner: &SourceScanner,
    engine: &SearchEngine,
    options: &SearchOptions,
    sink: &mut dyn SearchSink,
    dev_mode: bool,
) -> SearchOutcome {
    let provider = LocalSource::discover(scanner, roots);
    run(engine, &provider, options, sink, dev_mode, "search_word_in_local")
}

/// Searches the included remote repositories through `client`.
pub fn search_remote(
    client: &dyn RemoteRepository,
    roots: &[SearchRoot],
    engine: &SearchEngine,
    options: &SearchOptions,
    sink: &mut dyn SearchSink,
    dev_mode: bool,
) -> SearchOutcome {
    let (provider, fetch_elapsed) = timed(dev_mode, "fetch_remote_sources", || {
        RemoteSource::fetch(client, roots, &EnumerationRules::default())
    });
    let mut outcome = run(engine, &provider, options, sink, dev_mode, "search_word_in_github");
    outcome.elapsed = match (fetch_elapsed, outcome.elapsed) {
        (Some(fetch), Some(search)) => Some(fetch + search),
        _ => None,
    };
    outcome
}
