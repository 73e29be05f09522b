//! Fixtures shared by unit and integration tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use super::logging::default_filter;

static TEST_SUBSCRIBER: Once = Once::new();

/// Routes `tracing` output to the test writer, once per test binary.
///
/// Falls back to the dev-mode level when `RUST_LOG` is unset, so skipped
/// files show up in the output of a failing test.
pub fn setup_test_logging() {
    TEST_SUBSCRIBER.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(true)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Writes `content` to `root/relative`, creating missing parent directories.
pub fn write_source(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> io::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Permission tests cannot lock out uid 0, so they bail out early under it.
#[cfg(any(test, doctest))]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid only reads the process credentials.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
