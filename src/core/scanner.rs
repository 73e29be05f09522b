//! Discovers search roots and the source files beneath them.

use super::{display_name_of, SearchRoot, SourceFile};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const EXCLUDED_DIRECTORIES: &[&str] = &["__pycache__", ".idea", ".git"];
/// File (and root) names never offered for searching.
pub const EXCLUDED_MODULES: &[&str] = &[".idea"];
/// Extension of the files the tool searches.
pub const DEFAULT_EXTENSION: &str = "py";

/// Which files count as sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationRules {
    /// Without the leading dot.
    pub extension: String,
    pub excluded_directories: HashSet<String>,
    pub excluded_files: HashSet<String>,
}

impl Default for EnumerationRules {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            excluded_directories: EXCLUDED_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            excluded_files: EXCLUDED_MODULES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EnumerationRules {
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            ..Default::default()
        }
    }

    pub fn is_excluded_directory(&self, name: &str) -> bool {
        self.excluded_directories.contains(name)
    }

    /// Checks the file name against the exclusions and the required extension.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        if self.excluded_files.contains(name) {
            return false;
        }
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// Same as [`accepts_file_name`](Self::accepts_file_name) but also rejects
    /// any path that passes through an excluded directory. Used for remote
    /// listings, which arrive flat.
    pub fn accepts_relative_path(&self, path: &Path) -> bool {
        let mut components: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some(file_name) = components.pop() else {
            return false;
        };
        if components.iter().any(|dir| self.is_excluded_directory(dir)) {
            return false;
        }
        self.accepts_file_name(&file_name)
    }
}

/// Walks search roots and produces `SourceFile` candidates.
pub struct SourceScanner {
    rules: EnumerationRules,
}

impl Default for SourceScanner {
    fn default() -> Self {
        Self::new(EnumerationRules::default())
    }
}

impl SourceScanner {
    pub fn new(rules: EnumerationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &EnumerationRules {
        &self.rules
    }

    /// Lists the immediate subdirectories of `search_path` as roots.
    ///
    /// A root is included iff its name is in `checked_names`. A missing or
    /// non-directory `search_path` yields no roots.
    pub fn discover_roots(search_path: &Path, checked_names: &[String]) -> Vec<SearchRoot> {
        let entries = match fs::read_dir(search_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::info!("No modules under {:?}: {}", search_path, e);
                return Vec::new();
            }
        };

        let mut roots: Vec<SearchRoot> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", search_path, e);
                    None
                }
            })
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let name = display_name_of(&path);
                if EXCLUDED_MODULES.contains(&name.as_str()) {
                    return None;
                }
                let included = checked_names.iter().any(|checked| *checked == name);
                Some(SearchRoot {
                    name,
                    path,
                    included,
                })
            })
            .collect();

        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }

    /// Produces the source files under every included root, in root order and
    /// then file-name order within each root.
    pub fn discover(&self, roots: &[SearchRoot]) -> Vec<SourceFile> {
        let mut files = Vec::new();
        for root in roots.iter().filter(|root| root.included) {
            self.discover_root(root, &mut files);
        }

        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for file in &files {
            if let Some(previous) = seen.insert(file.display_name.as_str(), file.path.as_path()) {
                tracing::warn!(
                    "Duplicate module name {:?}: {:?} and {:?}",
                    file.display_name,
                    previous,
                    file.path
                );
            }
        }

        tracing::debug!("Discovered {} source files in {} roots", files.len(), roots.len());
        files
    }

    fn discover_root(&self, root: &SearchRoot, files: &mut Vec<SourceFile>) {
        if root.path.is_file() {
            if self.rules.accepts_file_name(&display_name_of(&root.path)) {
                files.push(SourceFile::local(root.path.clone(), root.name.clone()));
            }
            return;
        }

        if !root.path.is_dir() {
            tracing::info!("Search root {:?} does not exist", root.path);
            return;
        }

        let walker = WalkDir::new(&root.path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path under {:?}: {}", root.path, e);
                    continue;
                }
            };

            if !Self::is_listed_file(&entry) {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if self.rules.accepts_file_name(name) {
                    files.push(SourceFile::local(entry.path(), root.name.clone()));
                }
            }
        }
    }

    /// Regular files, plus symlinks that resolve to a file. Symlinked
    /// directories are never descended into.
    fn is_listed_file(entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
    }

    /// The root itself is never pruned, even if its own name is excluded.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.rules.is_excluded_directory(name))
    }

    /// Name → path map where a later file with the same name overwrites an
    /// earlier one. Prefer the full-path list from [`discover`](Self::discover).
    pub fn index_by_display_name(files: &[SourceFile]) -> BTreeMap<String, PathBuf> {
        files
            .iter()
            .map(|file| (file.display_name.clone(), file.path.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::write_source;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        write_source(root, relative, content).unwrap();
    }

    fn names(files: &[SourceFile]) -> Vec<String> {
        files.iter().map(|f| f.display_name.clone()).collect()
    }

    fn project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "pkg/a.py", "a = 1\n");
        write(root, "pkg/b.txt", "not python\n");
        write(root, "pkg/sub/c.py", "c = 3\n");
        write(root, "pkg/__pycache__/a.py", "cached\n");
        write(root, "pkg/.git/hooks.py", "hook\n");
        write(root, "pkg/.idea", "ide settings\n");
        write(root, "other/d.py", "d = 4\n");
        dir
    }

    #[test]
    fn discovers_python_files_and_prunes_excluded_directories() {
        let dir = project();
        let roots = vec![SearchRoot::new(dir.path().join("pkg"), true)];
        let files = SourceScanner::default().discover(&roots);

        assert_eq!(names(&files), vec!["a.py", "c.py"]);
        assert!(files.iter().all(|f| f.root_name == "pkg"));
        assert!(files
            .iter()
            .all(|f| !f.path.components().any(|c| c.as_os_str() == "__pycache__")));
    }

    #[test]
    fn excluded_file_names_are_skipped_even_with_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/keep.py", "");
        write(dir.path(), "pkg/skip.py", "");
        let mut rules = EnumerationRules::default();
        rules.excluded_files.insert("skip.py".to_string());

        let files = SourceScanner::new(rules).discover(&[SearchRoot::new(dir.path().join("pkg"), true)]);
        assert_eq!(names(&files), vec!["keep.py"]);
    }

    #[test]
    fn unchecked_roots_are_ignored() {
        let dir = project();
        let roots = vec![
            SearchRoot::new(dir.path().join("pkg"), false),
            SearchRoot::new(dir.path().join("other"), true),
        ];
        let files = SourceScanner::default().discover(&roots);
        assert_eq!(names(&files), vec!["d.py"]);
    }

    #[test]
    fn a_root_can_be_a_single_file() {
        let dir = project();
        let scanner = SourceScanner::default();

        let file_root = scanner.discover(&[SearchRoot::new(dir.path().join("other/d.py"), true)]);
        assert_eq!(names(&file_root), vec!["d.py"]);

        let wrong_ext = scanner.discover(&[SearchRoot::new(dir.path().join("pkg/b.txt"), true)]);
        assert!(wrong_ext.is_empty());
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = SourceScanner::default().discover(&[SearchRoot::new(dir.path().join("nope"), true)]);
        assert!(files.is_empty());
    }

    #[test]
    fn duplicate_names_are_kept_by_path_but_collapse_in_the_name_index() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/one/util.py", "first\n");
        write(dir.path(), "pkg/two/util.py", "second\n");

        let files = SourceScanner::default().discover(&[SearchRoot::new(dir.path().join("pkg"), true)]);
        assert_eq!(files.len(), 2);

        let index = SourceScanner::index_by_display_name(&files);
        assert_eq!(index.len(), 1);
        assert!(index["util.py"].ends_with("two/util.py"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed_but_symlinked_directories_are_not_walked() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "shared/lib.py", "x = 1\n");
        write(dir.path(), "shared/nested/deep.py", "y = 2\n");
        write(dir.path(), "pkg/own.py", "z = 3\n");
        symlink(dir.path().join("shared/lib.py"), dir.path().join("pkg/linked.py")).unwrap();
        symlink(dir.path().join("shared/nested"), dir.path().join("pkg/nested")).unwrap();
        symlink(dir.path().join("shared/missing.py"), dir.path().join("pkg/dangling.py")).unwrap();

        let files = SourceScanner::default().discover(&[SearchRoot::new(dir.path().join("pkg"), true)]);
        assert_eq!(names(&files), vec!["linked.py", "own.py"]);
    }

    #[test]
    fn discover_roots_lists_subdirectories_with_checked_flags() {
        let dir = project();
        fs::create_dir_all(dir.path().join(".idea")).unwrap();
        write(dir.path(), "loose.py", "");

        let roots = SourceScanner::discover_roots(dir.path(), &["other".to_string()]);
        let summary: Vec<(&str, bool)> = roots.iter().map(|r| (r.name.as_str(), r.included)).collect();
        assert_eq!(summary, vec![("other", true), ("pkg", false)]);
    }

    #[test]
    fn discover_roots_on_missing_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SourceScanner::discover_roots(&dir.path().join("missing"), &[]).is_empty());
    }

    #[test]
    fn relative_paths_respect_directory_exclusions() {
        let rules = EnumerationRules::default();
        assert!(rules.accepts_relative_path(Path::new("src/app/main.py")));
        assert!(!rules.accepts_relative_path(Path::new("src/__pycache__/main.py")));
        assert!(!rules.accepts_relative_path(Path::new("src/app/main.rs")));
        assert!(!rules.accepts_relative_path(Path::new("")));
    }

    #[test]
    fn extension_can_be_given_with_a_dot() {
        let rules = EnumerationRules::with_extension(".rs");
        assert!(rules.accepts_file_name("lib.rs"));
        assert!(!rules.accepts_file_name("lib.py"));
    }
}
