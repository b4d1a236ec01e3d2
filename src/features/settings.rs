//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::lyrics::HighlightStyle;
use super::lyrics::display::{DEFAULT_SUNG_COLOR, DEFAULT_UNSUNG_COLOR};

/// Application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lyric display settings
    pub display: DisplaySettings,
    /// Sync loop settings
    pub sync: SyncSettings,
}

/// Lyric display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Colour of the already sung prefix
    pub sung_color: String,
    /// Colour of the rest of the line
    pub unsung_color: String,
    /// Show the line before the current one (three-line layouts)
    pub show_previous_line: bool,
    /// Show the upcoming line
    pub show_next_line: bool,
}

/// Sync loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            sung_color: DEFAULT_SUNG_COLOR.to_string(),
            unsung_color: DEFAULT_UNSUNG_COLOR.to_string(),
            show_previous_line: true,
            show_next_line: true,
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16, // ~60 ticks per second
        }
    }
}

impl DisplaySettings {
    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle::new(&self.sung_color, &self.unsung_color)
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "karaoke-sync", "KaraokeSync")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::debug!("Using default settings ({:?}): {}", path, e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.display.sung_color = "#00FF00".to_string();
        settings.sync.tick_interval_ms = 33;
        settings.save_to_file(&path).unwrap();

        assert_eq!(Settings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"display":{"show_previous_line":false}}"#).unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert!(!settings.display.show_previous_line);
        assert_eq!(settings.display.sung_color, DEFAULT_SUNG_COLOR);
        assert_eq!(settings.sync.tick_interval_ms, 16);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Settings::load_from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SettingsError::Io(_))));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_highlight_style_from_settings() {
        let style = DisplaySettings::default().highlight_style();
        assert_eq!(style, HighlightStyle::default());
    }
}
