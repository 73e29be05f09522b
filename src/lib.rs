// Declare all modules as public so they can be used by the presentation layer and tests.
pub mod app;
pub mod config;
pub mod core;
pub mod remote;
pub mod utils;
