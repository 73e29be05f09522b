//! Defines the state the presentation layer binds its controls to.

use crate::config::settings::{load_settings, store_setting};
use crate::config::{
    Settings, COLUMN_COUNT, DEV_MODE, GITHUB_CHECKED_MODULES, GITHUB_TOKEN, LOCAL_CHECKED_MODULES,
    SEARCH_PATH,
};
use crate::core::{SearchRoot, SourceScanner};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Holds the settings and the local roots offered for searching.
///
/// Every mutation that the user would expect to survive a restart is written
/// to the settings file explicitly, one key at a time.
pub struct SearchSession {
    /// The application's persisted settings.
    pub settings: Settings,
    /// The modules found under the search path, with their checked flags.
    pub roots: Vec<SearchRoot>,
    /// Where the settings file lives; `None` means the platform default.
    config_dir: Option<PathBuf>,
}

impl SearchSession {
    /// Loads settings (creating defaults on first run) and discovers the roots.
    pub fn open(config_dir: Option<&Path>) -> Result<Self> {
        let settings = load_settings(config_dir)?;
        let mut session = Self {
            settings,
            roots: Vec::new(),
            config_dir: config_dir.map(Path::to_path_buf),
        };
        session.refresh_roots();
        Ok(session)
    }

    fn store<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        store_setting(key, value, self.config_dir.as_deref())
    }

    /// Re-lists the modules under the search path, restoring checked flags from the settings.
    pub fn refresh_roots(&mut self) {
        self.roots = match self.settings.search_path() {
            Some(path) => SourceScanner::discover_roots(&path, self.settings.local_checked()),
            None => Vec::new(),
        };
        tracing::debug!("Search path: {:?}, {} modules", self.settings.search_path, self.roots.len());
    }

    /// Switches to a new search path. Only existing directories are accepted.
    ///
    /// The checked-module list belongs to the old path, so it is reset.
    pub fn set_search_path(&mut self, path: &Path) -> Result<bool> {
        if !path.is_dir() {
            tracing::info!("Rejected search path {:?}: not a directory", path);
            return Ok(false);
        }

        let path_string = path.to_string_lossy().into_owned();
        self.store(SEARCH_PATH, &path_string)?;
        self.store(LOCAL_CHECKED_MODULES, Option::<Vec<String>>::None)?;

        self.settings.search_path = path_string;
        self.settings.local_checked_modules = None;
        self.refresh_roots();
        Ok(true)
    }

    /// Toggles one root. Returns `false` if no root has that name.
    pub fn set_root_included(&mut self, name: &str, included: bool) -> bool {
        match self.roots.iter_mut().find(|root| root.name == name) {
            Some(root) => {
                root.included = included;
                true
            }
            None => false,
        }
    }

    pub fn check_all(&mut self) -> Result<()> {
        self.roots.iter_mut().for_each(|root| root.included = true);
        self.save_checked_roots()
    }

    pub fn uncheck_all(&mut self) -> Result<()> {
        self.roots.iter_mut().for_each(|root| root.included = false);
        self.save_checked_roots()
    }

    /// Persists the names of the currently included roots.
    pub fn save_checked_roots(&mut self) -> Result<()> {
        let checked: Vec<String> = self.included_roots().into_iter().map(|root| root.name).collect();
        self.store(LOCAL_CHECKED_MODULES, &checked)?;
        self.settings.local_checked_modules = Some(checked);
        Ok(())
    }

    /// Persists the names of the included remote repositories.
    pub fn save_github_checked(&mut self, roots: &[SearchRoot]) -> Result<()> {
        let checked: Vec<String> = roots
            .iter()
            .filter(|root| root.included)
            .map(|root| root.name.clone())
            .collect();
        self.store(GITHUB_CHECKED_MODULES, &checked)?;
        self.settings.github_checked_modules = Some(checked);
        Ok(())
    }

    pub fn included_roots(&self) -> Vec<SearchRoot> {
        self.roots.iter().filter(|root| root.included).cloned().collect()
    }

    /// Stores the layout column count, clamped to the supported range.
    pub fn set_column_layout(&mut self, columns: u32) -> Result<u32> {
        let columns = Settings::clamp_column_count(columns);
        self.store(COLUMN_COUNT, columns)?;
        self.settings.column_layout = columns;
        Ok(columns)
    }

    pub fn set_dev_mode(&mut self, enabled: bool) -> Result<()> {
        self.store(DEV_MODE, enabled)?;
        self.settings.dev_mode = enabled;
        tracing::debug!("Dev mode: {}", enabled);
        Ok(())
    }

    pub fn set_github_token(&mut self, token: &str) -> Result<()> {
        let token = token.trim().to_string();
        self.store(GITHUB_TOKEN, &token)?;
        self.settings.github_token = Some(token);
        Ok(())
    }
}
