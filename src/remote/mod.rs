//! Remote repositories as an alternate source of files.
//!
//! The remote API is an external collaborator: it lists repositories and
//! returns every file of a repository with its content. Everything after that
//! (filtering, matching, context, highlighting) is shared with local search.

pub mod github;

use crate::core::{CoreError, EnumerationRules, SearchRoot, SourceFile, SourceProvider};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use github::GitHubClient;

/// A file fetched from a remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Path relative to the repository root.
    pub path: String,
    pub content: Vec<u8>,
}

/// The source-hosting API, as seen by the search engine.
pub trait RemoteRepository {
    /// Full names (`owner/name`) of the repositories the user can access.
    fn repositories(&self) -> Result<Vec<String>, CoreError>;

    /// Every file of `repository`, recursively, with its raw content.
    ///
    /// `wanted` receives each repository-relative path; implementations may
    /// skip downloading files it rejects.
    fn files(&self, repository: &str, wanted: &dyn Fn(&str) -> bool) -> Result<Vec<RemoteFile>, CoreError>;
}

/// Turns repository names into search roots, restoring previously checked ones.
pub fn repository_roots(
    client: &dyn RemoteRepository,
    checked_names: &[String],
) -> Result<Vec<SearchRoot>, CoreError> {
    Ok(client
        .repositories()?
        .into_iter()
        .map(|name| {
            let included = checked_names.contains(&name);
            SearchRoot::named(name.clone(), name, included)
        })
        .collect())
}

/// Remote files fetched up front for the included roots.
pub struct RemoteSource {
    files: Vec<SourceFile>,
    contents: HashMap<(String, PathBuf), Vec<u8>>,
}

impl RemoteSource {
    /// Fetches every included repository. A repository whose listing fails is
    /// skipped with a warning.
    pub fn fetch(client: &dyn RemoteRepository, roots: &[SearchRoot], rules: &EnumerationRules) -> Self {
        let mut files = Vec::new();
        let mut contents = HashMap::new();

        for root in roots.iter().filter(|root| root.included) {
            let wanted = |path: &str| rules.accepts_relative_path(Path::new(path));
            let mut listing = match client.files(&root.name, &wanted) {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::warn!("Cannot list repository {}: {}", root.name, e);
                    continue;
                }
            };
            listing.sort_by(|a, b| a.path.cmp(&b.path));

            for remote in listing {
                let path = PathBuf::from(&remote.path);
                if !rules.accepts_relative_path(&path) {
                    continue;
                }
                files.push(SourceFile::remote(path.clone(), root.name.clone()));
                contents.insert((root.name.clone(), path), remote.content);
            }
        }

        tracing::debug!("Fetched {} remote source files", files.len());
        Self { files, contents }
    }
}

impl SourceProvider for RemoteSource {
    fn sources(&self) -> Vec<SourceFile> {
        self.files.clone()
    }

    fn load(&self, source: &SourceFile) -> Result<String, CoreError> {
        let bytes = self
            .contents
            .get(&(source.root_name.clone(), source.path.clone()))
            .ok_or_else(|| CoreError::Remote(format!("{} was not fetched", source.path.display())))?;
        String::from_utf8(bytes.clone()).map_err(|_| CoreError::TextDecode(source.path.clone()))
    }
}
