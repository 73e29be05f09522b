//! The presentation-facing layer: session state and search entry points.
//!
//! Window, dialog and widget code lives outside this crate; it binds its
//! controls to `SearchSession` and renders the events the tasks emit.

pub mod state;
pub mod tasks;

pub use state::SearchSession;
pub use tasks::{search_local, search_remote, search_roots, SearchOutcome};
