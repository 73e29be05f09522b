//! GitHub REST API client authenticated with a personal access token.

use super::{RemoteFile, RemoteRepository};
use crate::core::CoreError;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const API_ROOT: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: usize = 100;
const USER_AGENT: &str = concat!("word-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Tree {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    sha: String,
}

pub struct GitHubClient {
    http: Client,
    token: String,
    api_root: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, CoreError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            token: token.into(),
            api_root: API_ROOT.to_string(),
        })
    }

    /// Points the client at another API root, e.g. a GitHub Enterprise server.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn send(request: RequestBuilder) -> Result<Response, CoreError> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CoreError::Remote(format!("{} returned {}", response.url(), status)))
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let request = self.get(path).header(ACCEPT, "application/vnd.github+json");
        Ok(Self::send(request)?.json::<T>()?)
    }

    fn get_raw(&self, path: &str) -> Result<Vec<u8>, CoreError> {
        let request = self.get(path).header(ACCEPT, "application/vnd.github.raw");
        Ok(Self::send(request)?.bytes()?.to_vec())
    }

    fn default_branch(&self, repository: &str) -> Result<String, CoreError> {
        let repo: Repository = self.get_json(&format!("repos/{repository}"))?;
        repo.default_branch
            .ok_or_else(|| CoreError::Remote(format!("{} has no default branch", repo.full_name)))
    }
}

/// Keeps the blob entries of a tree listing that the caller wants.
fn wanted_blobs(tree: Tree, wanted: &dyn Fn(&str) -> bool) -> Vec<TreeEntry> {
    tree.tree
        .into_iter()
        .filter(|entry| entry.kind == "blob" && wanted(&entry.path))
        .collect()
}

impl RemoteRepository for GitHubClient {
    fn repositories(&self) -> Result<Vec<String>, CoreError> {
        let mut names = Vec::new();
        for page in 1.. {
            let repos: Vec<Repository> =
                self.get_json(&format!("user/repos?per_page={PAGE_SIZE}&page={page}"))?;
            let count = repos.len();
            names.extend(repos.into_iter().map(|repo| repo.full_name));
            if count < PAGE_SIZE {
                break;
            }
        }
        Ok(names)
    }

    fn files(&self, repository: &str, wanted: &dyn Fn(&str) -> bool) -> Result<Vec<RemoteFile>, CoreError> {
        let branch = self.default_branch(repository)?;
        let tree: Tree = self.get_json(&format!("repos/{repository}/git/trees/{branch}?recursive=1"))?;
        if tree.truncated {
            tracing::warn!("File listing of {} is truncated", repository);
        }

        let mut files = Vec::new();
        for entry in wanted_blobs(tree, wanted) {
            match self.get_raw(&format!("repos/{repository}/git/blobs/{}", entry.sha)) {
                Ok(content) => files.push(RemoteFile {
                    path: entry.path,
                    content,
                }),
                Err(e) => tracing::debug!("Cannot fetch {} from {}: {}", entry.path, repository, e),
            }
        }
        Ok(files)
    }
}
