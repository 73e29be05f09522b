pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SEARCH_PATH: &str = "__search_path__";
pub const DEV_MODE: &str = "__dev_mode__";
pub const COLUMN_COUNT: &str = "__column_layout__";
pub const LOCAL_CHECKED_MODULES: &str = "__local_checked_modules__";
pub const GITHUB_TOKEN: &str = "__github_token__";
pub const GITHUB_CHECKED_MODULES: &str = "__github_checked_modules__";

pub const DEFAULT_COLUMN_COUNT: u32 = 5;
pub const MIN_COLUMN_COUNT: u32 = 1;
pub const MAX_COLUMN_COUNT: u32 = 10;

/// The persisted settings document. Owned by the application; the search
/// engine only sees the roots and options derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(rename = "__search_path__")]
    pub search_path: String,
    #[serde(rename = "__dev_mode__")]
    pub dev_mode: bool,
    #[serde(rename = "__column_layout__")]
    pub column_layout: u32,
    #[serde(rename = "__local_checked_modules__", default)]
    pub local_checked_modules: Option<Vec<String>>,
    #[serde(rename = "__github_token__", default)]
    pub github_token: Option<String>,
    #[serde(rename = "__github_checked_modules__", default)]
    pub github_checked_modules: Option<Vec<String>>,
}

impl Settings {
    /// Loads from the default location, or from `config_dir` when given.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        settings::load_settings(config_dir)
    }

    /// The configured search path, if one is set.
    pub fn search_path(&self) -> Option<PathBuf> {
        (!self.search_path.is_empty()).then(|| PathBuf::from(&self.search_path))
    }

    pub fn local_checked(&self) -> &[String] {
        self.local_checked_modules.as_deref().unwrap_or_default()
    }

    pub fn github_checked(&self) -> &[String] {
        self.github_checked_modules.as_deref().unwrap_or_default()
    }

    /// A token is only usable when it is non-empty.
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    pub fn clamp_column_count(columns: u32) -> u32 {
        columns.clamp(MIN_COLUMN_COUNT, MAX_COLUMN_COUNT)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_path: String::new(),
            dev_mode: false,
            column_layout: DEFAULT_COLUMN_COUNT,
            local_checked_modules: None,
            github_token: None,
            github_checked_modules: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_uses_the_legacy_key_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json[SEARCH_PATH], "");
        assert_eq!(json[DEV_MODE], false);
        assert_eq!(json[COLUMN_COUNT], 5);
        assert!(json[LOCAL_CHECKED_MODULES].is_null());
        assert!(json[GITHUB_TOKEN].is_null());
    }

    #[test]
    fn optional_keys_may_be_absent() {
        let settings: Settings = serde_json::from_str(
            r#"{"__search_path__": "/src", "__dev_mode__": true, "__column_layout__": 3}"#,
        )
        .unwrap();
        assert_eq!(settings.search_path(), Some(PathBuf::from("/src")));
        assert!(settings.local_checked().is_empty());
        assert_eq!(settings.github_token(), None);
    }

    #[test]
    fn blank_token_is_not_usable() {
        let settings = Settings {
            github_token: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.github_token(), None);
    }

    #[test]
    fn column_count_is_clamped_to_the_slider_range() {
        assert_eq!(Settings::clamp_column_count(0), 1);
        assert_eq!(Settings::clamp_column_count(7), 7);
        assert_eq!(Settings::clamp_column_count(42), 10);
    }
}
