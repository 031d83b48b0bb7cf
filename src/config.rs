//! Configuration management for podtui
//!
//! Handles config file loading/saving and the API endpoint override chain.
//! Config is stored at ~/.config/podtui/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_URL;
use crate::ui::theme::ThemeMode;

/// Environment variable overriding the catalog endpoint
pub const API_URL_ENV: &str = "PODTUI_API_URL";

/// Shows per page when nothing is configured
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL
    pub api_url: Option<String>,
    /// Shows per list page
    pub page_size: Option<usize>,
    /// Initial color theme
    pub theme: Option<ThemeMode>,
}

impl Config {
    /// Get config file path (~/.config/podtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("podtui").join("config.toml"))
    }

    /// Load config from the default file, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from a specific file; missing or malformed files give defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save config to the default file
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Catalog URL with fallback chain:
    /// 1. Environment variable PODTUI_API_URL
    /// 2. `api_url` from the config file
    /// 3. The public catalog
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }

        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Shows per page, never 0
    pub fn page_size(&self) -> usize {
        self.page_size.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Initial theme
    pub fn theme(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    /// Copy of this config remembering `theme`, or `None` if nothing changes
    pub fn with_theme(&self, theme: ThemeMode) -> Option<Self> {
        (self.theme() != theme).then(|| Self {
            theme: Some(theme),
            ..self.clone()
        })
    }
}
