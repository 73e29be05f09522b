//! A common interface over where source files come from.

use super::{CoreError, SearchRoot, SourceFile, SourceScanner};
use std::fs;

/// Supplies source files and their text to the search engine.
///
/// Local folders and remote repositories both implement this, so matching,
/// context and highlighting share one code path.
pub trait SourceProvider {
    /// The files to search, in a stable order.
    fn sources(&self) -> Vec<SourceFile>;

    /// The full text of `source`.
    fn load(&self, source: &SourceFile) -> Result<String, CoreError>;
}

/// Files discovered on the local file system.
pub struct LocalSource {
    files: Vec<SourceFile>,
}

impl LocalSource {
    /// Enumerates the included roots once; the list is reused for the whole search.
    pub fn discover(scanner: &SourceScanner, roots: &[SearchRoot]) -> Self {
        Self {
            files: scanner.discover(roots),
        }
    }

    pub fn from_files(files: Vec<SourceFile>) -> Self {
        Self { files }
    }
}

impl SourceProvider for LocalSource {
    fn sources(&self) -> Vec<SourceFile> {
        self.files.clone()
    }

    fn load(&self, source: &SourceFile) -> Result<String, CoreError> {
        let bytes = fs::read(&source.path).map_err(|e| CoreError::from_io(e, &source.path))?;
        String::from_utf8(bytes).map_err(|_| CoreError::TextDecode(source.path.clone()))
    }
}
