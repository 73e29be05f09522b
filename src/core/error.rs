//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// None of these escape a search invocation: the engine logs them per file
/// and keeps going. They surface from the lower-level helpers
/// (`SourceProvider::load`, remote listings) so callers can decide.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The file exists but cannot be opened, typically a permission error.
    #[error("Permission denied for {0}")]
    FileAccessDenied(PathBuf),

    /// Represents any other I/O error from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// The file bytes are not valid UTF-8 text.
    #[error("Cannot decode {0} as UTF-8 text")]
    TextDecode(PathBuf),

    /// The remote source-hosting API rejected or failed a request.
    #[error("Remote request failed: {0}")]
    Remote(String),

    /// Transport-level failure talking to the remote API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to the matching variant.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => CoreError::FileAccessDenied(path),
            _ => CoreError::Io(err, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn permission_errors_map_to_access_denied() {
        let err = CoreError::from_io(
            io::Error::from(io::ErrorKind::PermissionDenied),
            "/tmp/locked.py",
        );
        assert!(matches!(err, CoreError::FileAccessDenied(ref p) if p.ends_with("locked.py")));
        assert_eq!(err.to_string(), "Permission denied for /tmp/locked.py");
    }

    #[test]
    fn other_errors_keep_their_source() {
        let err = CoreError::from_io(io::Error::from(io::ErrorKind::NotFound), "/tmp/gone.py");
        assert!(matches!(err, CoreError::Io(ref e, _) if e.kind() == io::ErrorKind::NotFound));
    }
}
