use anyhow::Result;
use directories::ProjectDirs;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;

const APP_NAME: &str = "WordFinder";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "wordfinder", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Resolves the directory to use: the override if given, else the platform default.
fn resolve_directory(config_dir: Option<&Path>) -> Result<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => get_config_directory()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Returns the full path to the settings file.
pub fn get_config_file_path(config_dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_directory(config_dir)?.join(CONFIG_FILE))
}

/// Loads the settings from the settings file.
/// If the file doesn't exist, it creates a default one.
/// If the file cannot be parsed, missing or null keys are filled with their
/// defaults; if that fails too, the defaults are used.
pub fn load_settings(config_dir: Option<&Path>) -> Result<Settings> {
    let config_path = get_config_file_path(config_dir)?;

    if !config_path.exists() {
        tracing::info!(
            "Configuration not found, applying base configuration at {:?}",
            config_path
        );
        let default_settings = Settings::default();
        save_settings(&default_settings, config_dir)?;
        return Ok(default_settings);
    }

    let content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {:?}", config_path);
            Ok(settings)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse settings at {:?}: {}. Repairing from defaults.",
                config_path,
                e
            );
            repair_settings(&content).or_else(|_| Ok(Settings::default()))
        }
    }
}

/// Fills missing or null keys of a partial document with the default values.
fn repair_settings(content: &str) -> Result<Settings> {
    let mut value: Value = serde_json::from_str(content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Settings document is not a JSON object"))?;

    let defaults = match serde_json::to_value(Settings::default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for (key, default_val) in defaults {
        if obj.get(&key).map_or(true, Value::is_null) {
            obj.insert(key, default_val);
        }
    }

    let repaired: Settings = serde_json::from_value(value)?;
    tracing::info!("Successfully repaired settings document");
    Ok(repaired)
}

/// Saves the provided settings to the settings file.
pub fn save_settings(settings: &Settings, config_dir: Option<&Path>) -> Result<()> {
    let dir = resolve_directory(config_dir)?;

    // Create config directory if it doesn't exist.
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        tracing::info!("Created config directory: {:?}", dir);
    }

    let config_path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(settings)?;

    fs::write(&config_path, json)?;
    tracing::debug!("Saved settings to {:?}", config_path);

    Ok(())
}

/// Rewrites a single key: reads the whole document, replaces `key`, writes it back.
///
/// There is no locking; two writers racing on the file lose one update.
pub fn store_setting<T: Serialize>(key: &str, value: T, config_dir: Option<&Path>) -> Result<()> {
    let config_path = get_config_file_path(config_dir)?;

    let mut document = if config_path.exists() {
        serde_json::from_str::<Value>(&fs::read_to_string(&config_path)?)?
    } else {
        serde_json::to_value(Settings::default())?
    };

    document
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Settings document is not a JSON object"))?
        .insert(key.to_string(), serde_json::to_value(value)?);

    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&config_path, serde_json::to_string_pretty(&document)?)?;
    tracing::debug!("Stored {} in {:?}", key, config_path);
    Ok(())
}

/// Reads a single key from the settings file. Missing file or key gives `None`.
pub fn get_setting_by_name(key: &str, config_dir: Option<&Path>) -> Result<Option<Value>> {
    let config_path = get_config_file_path(config_dir)?;
    if !config_path.exists() {
        return Ok(None);
    }
    let document: Value = serde_json::from_str(&fs::read_to_string(&config_path)?)?;
    Ok(document.get(key).cloned())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.wordfinder.WordFinder/
// Linux:   ~/.config/wordfinder/
// Windows: %APPDATA%/wordfinder/WordFinder/config/
