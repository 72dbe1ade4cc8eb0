// SPDX-License-Identifier: MPL-2.0

use crate::config::{APP_ID, DEFAULT_LOG_FILTER, DEFAULT_VIP_DAYS};
use crate::store::{BoardDb, MAX_IMAGE_BYTES, SqliteKv, StoreError, encode_image_with_limit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent board settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Database location; the platform data dir when unset
    pub db_path: Option<PathBuf>,
    pub max_image_bytes: usize,
    /// Length of a VIP grant when the caller does not pick one
    pub default_vip_days: u32,
    /// `tracing` filter directive, overridden by RUST_LOG
    pub log_filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            db_path: None,
            max_image_bytes: MAX_IMAGE_BYTES,
            default_vip_days: DEFAULT_VIP_DAYS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl BoardSettings {
    /// Get the settings file path (~/.config/io.github.comu.Board/settings.json)
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push(APP_ID);
            p.push("settings.json");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;

        Ok(())
    }

    /// Open the board database these settings point at
    pub fn open_db(&self) -> Result<BoardDb, StoreError> {
        let kv = match &self.db_path {
            Some(path) => SqliteKv::open(path)?,
            None => SqliteKv::open_default()?,
        };
        tracing::info!(path = ?self.db_path, "board database opened");
        Ok(BoardDb::new(kv))
    }

    /// [`crate::encode_image`] with the configured size limit
    pub fn encode_image(&self, bytes: &[u8]) -> Result<String, StoreError> {
        encode_image_with_limit(bytes, self.max_image_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = BoardSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, BoardSettings::default());
        assert_eq!(settings.default_vip_days, 30);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_vip_days": 7}"#).unwrap();

        let settings = BoardSettings::load_from(&path);
        assert_eq!(settings.default_vip_days, 7);
        assert_eq!(settings.max_image_bytes, MAX_IMAGE_BYTES);
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(BoardSettings::load_from(&path), BoardSettings::default());
    }

    #[test]
    fn test_save_then_open_db() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = BoardSettings {
            db_path: Some(dir.path().join("data").join("board.db")),
            max_image_bytes: 16,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = BoardSettings::load_from(&path);
        assert_eq!(loaded, settings);

        let db = loaded.open_db().unwrap();
        db.banned_words().add("x").unwrap();
        assert_eq!(db.banned_words().list().unwrap(), vec!["x"]);

        assert!(matches!(
            loaded.encode_image(&[0u8; 17]),
            Err(StoreError::ImageTooLarge { limit: 16, .. })
        ));
    }
}
