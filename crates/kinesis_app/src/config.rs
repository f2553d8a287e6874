//! Site configuration (kinesis.toml)
//!
//! Every table and field is optional; a missing file section falls back to
//! the defaults below.
//!
//! ```toml
//! [viewport]
//! width = 390
//! height = 844
//!
//! [theme]
//! storage = "file"
//! path = "/tmp/kinesis-prefs.json"
//!
//! [particles]
//! spawn_interval_ms = 250
//! ```

use crate::error::{AppError, Result};
use kinesis_animation::ParticleConfig;
use kinesis_theme::{FileStorage, MemoryStorage, PreferenceStorage, DEFAULT_STORAGE_KEY};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level site configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub nav: NavConfig,
}

/// Initial viewport size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Where the theme preference is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    /// Preferences file; defaults to the platform config directory
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            path: None,
            key: default_storage_key(),
        }
    }
}

impl ThemeConfig {
    /// Open the configured preference storage
    pub fn open_storage(&self) -> Result<Box<dyn PreferenceStorage>> {
        match self.storage {
            StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
            StorageBackend::File => {
                let storage = match &self.path {
                    Some(path) => FileStorage::new(path),
                    None => FileStorage::at_default_location()?,
                };
                tracing::debug!(path = %storage.path().display(), "using file preference storage");
                Ok(Box::new(storage))
            }
        }
    }
}

/// Headless layout metrics, in px
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub header_height: f32,
    pub section_padding: f32,
    pub headline_height: f32,
    pub gap: f32,
    pub max_content_width: f32,
    /// Viewports narrower than this collapse every grid to one column
    pub mobile_breakpoint: f32,
    pub stat_height: f32,
    pub card_height: f32,
    pub filter_bar_height: f32,
    pub skill_row_height: f32,
    pub tab_bar_height: f32,
    pub experience_height: f32,
    pub education_card_height: f32,
    pub highlight_height: f32,
    pub certificate_height: f32,
    pub contact_card_height: f32,
    pub footer_height: f32,
    pub stat_columns: usize,
    pub card_columns: usize,
    pub skill_columns: usize,
    pub certificate_columns: usize,
    pub contact_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 64.0,
            section_padding: 96.0,
            headline_height: 120.0,
            gap: 24.0,
            max_content_width: 1152.0,
            mobile_breakpoint: 768.0,
            stat_height: 140.0,
            card_height: 260.0,
            filter_bar_height: 56.0,
            skill_row_height: 72.0,
            tab_bar_height: 56.0,
            experience_height: 640.0,
            education_card_height: 320.0,
            highlight_height: 48.0,
            certificate_height: 240.0,
            contact_card_height: 180.0,
            footer_height: 160.0,
            stat_columns: 4,
            card_columns: 3,
            skill_columns: 3,
            certificate_columns: 3,
            contact_columns: 3,
        }
    }
}

/// Navigation bar behavior
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavConfig {
    /// Scroll offset past which the bar switches to its scrolled look
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f32,
}

fn default_scrolled_threshold() -> f32 {
    50.0
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: default_scrolled_threshold(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        let config: SiteConfig = toml::from_str(text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(AppError::InvalidConfig(
                "viewport dimensions must be positive".into(),
            ));
        }
        let layout = &self.layout;
        let columns = [
            layout.stat_columns,
            layout.card_columns,
            layout.skill_columns,
            layout.certificate_columns,
            layout.contact_columns,
        ];
        if columns.contains(&0) {
            return Err(AppError::InvalidConfig("column counts must be > 0".into()));
        }
        if self.particles.spawn_interval_ms == 0 {
            return Err(AppError::InvalidConfig(
                "particles.spawn_interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SiteConfig::from_toml_str("", Path::new("kinesis.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.theme.key, "theme");
        assert_eq!(config.nav.scrolled_threshold, 50.0);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let text = r#"
            [viewport]
            width = 390

            [theme]
            storage = "memory"

            [particles]
            spawn_interval_ms = 250

            [layout]
            card_columns = 2
        "#;
        let config = SiteConfig::from_toml_str(text, Path::new("kinesis.toml")).unwrap();
        assert_eq!(config.viewport.width, 390.0);
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.theme.storage, StorageBackend::Memory);
        assert_eq!(config.particles.spawn_interval_ms, 250);
        assert_eq!(config.particles.burst_count, 15);
        assert_eq!(config.layout.card_columns, 2);
        assert_eq!(config.layout.stat_columns, 4);
    }

    #[test]
    fn rejects_degenerate_values() {
        let err = SiteConfig::from_toml_str("[viewport]\nheight = 0", Path::new("k.toml"));
        assert!(matches!(err, Err(AppError::InvalidConfig(_))));

        let err = SiteConfig::from_toml_str("[layout]\nskill_columns = 0", Path::new("k.toml"));
        assert!(matches!(err, Err(AppError::InvalidConfig(_))));

        let err = SiteConfig::from_toml_str("[theme]\nstorage = \"cloud\"", Path::new("k.toml"));
        assert!(matches!(err, Err(AppError::Config { .. })));
    }

    #[test]
    fn explicit_path_opens_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ThemeConfig {
            path: Some(dir.path().join("prefs.json")),
            ..ThemeConfig::default()
        };
        let mut storage = theme.open_storage().unwrap();
        storage.store("theme", "dark").unwrap();
        assert!(dir.path().join("prefs.json").exists());
    }
}
