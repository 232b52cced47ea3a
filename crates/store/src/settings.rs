//! Application settings management
//!
//! Settings live in `<dir>/settings.json`. A missing file yields defaults;
//! an unreadable one is logged and replaced by defaults.

use crate::Result;
use edit_engine::DesignerConfig;
use export::ExportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Authoring surface settings
    pub designer: DesignerConfig,
    /// Print / document export settings
    pub export: ExportConfig,
}

impl AppSettings {
    fn parse_or_default(content: &str, path: &Path) -> Self {
        match serde_json::from_str::<AppSettings>(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to parse settings file, using defaults: {}",
                    e
                );
                AppSettings::default()
            }
        }
    }
}

/// Settings manager for loading, saving, and updating application settings
pub struct SettingsManager {
    settings_path: PathBuf,
    current: AppSettings,
}

impl SettingsManager {
    /// Create a settings manager rooted at the given data directory
    pub fn new(app_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: app_data_dir.into().join("settings.json"),
            current: AppSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&AppSettings> {
        self.current = match tokio::fs::read_to_string(&self.settings_path).await {
            Ok(content) => AppSettings::parse_or_default(&content, &self.settings_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during startup)
    pub fn load_sync(&mut self) -> Result<&AppSettings> {
        self.current = match std::fs::read_to_string(&self.settings_path) {
            Ok(content) => AppSettings::parse_or_default(&content, &self.settings_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Replace the settings and save to disk
    pub async fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    pub fn update_sync(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }
}
