use tracing_subscriber::EnvFilter;

/// The default filter: everything at `debug` in dev mode, `info` otherwise.
pub fn default_filter(dev_mode: bool) -> &'static str {
    if dev_mode {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the dev-mode default.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(dev_mode: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(dev_mode)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
