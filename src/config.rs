//! Run configuration.
//!
//! An optional TOML file (`--config`, else `<config dir>/config.toml`) can
//! pin the locale, data source and cache directory, and override handbook
//! titles and labels. CLI flags and `ARK_LORE_*` variables win over the file;
//! the file wins over the locale's built-in defaults.
//!
//! ```toml
//! [data]
//! locale = "ja_JP"
//! cache_dir = "/var/cache/ark-lore"
//!
//! [handbook]
//! display_sections = ["基礎情報", "個人履歴", "健康診断", "臨床診断分析"]
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transform::{HandbookLabels, Locale, StatLabels};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub handbook: HandbookOverrides,
}

/// `[data]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    pub locale: Option<Locale>,
    /// Raw-file root of the vendor data repository
    pub base_url: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

/// `[handbook]` section; every field replaces the locale default when set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandbookOverrides {
    pub label_open: Option<String>,
    pub label_close: Option<String>,
    pub basic_info: Option<String>,
    pub ability_measurement: Option<String>,
    pub race: Option<String>,
    pub stats: Option<StatLabels>,
    pub profile_sections: Option<Vec<String>>,
    pub lore_sections: Option<Vec<String>>,
    pub display_sections: Option<Vec<String>>,
}

impl HandbookOverrides {
    pub fn apply(&self, defaults: HandbookLabels) -> HandbookLabels {
        let o = self.clone();
        HandbookLabels {
            label_open: o.label_open.unwrap_or(defaults.label_open),
            label_close: o.label_close.unwrap_or(defaults.label_close),
            basic_info: o.basic_info.unwrap_or(defaults.basic_info),
            ability_measurement: o.ability_measurement.unwrap_or(defaults.ability_measurement),
            race: o.race.unwrap_or(defaults.race),
            stats: o.stats.unwrap_or(defaults.stats),
            profile_sections: o.profile_sections.unwrap_or(defaults.profile_sections),
            lore_sections: o.lore_sections.unwrap_or(defaults.lore_sections),
            display_sections: o.display_sections.unwrap_or(defaults.display_sections),
        }
    }
}

/// Everything a command needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub locale: Locale,
    pub base_url: String,
    pub cache_dir: Option<PathBuf>,
    pub labels: HandbookLabels,
}

impl Settings {
    pub fn for_locale(locale: Locale) -> Self {
        AppConfig::default().settings(Some(locale), None)
    }
}

impl AppConfig {
    /// Load `path`, or the default config file when it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::read(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ark-lore-to-sqlite")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        tracing::debug!(?path, "loaded config file");
        Ok(config)
    }

    /// Merge CLI values over the file and locale defaults
    pub fn settings(&self, locale: Option<Locale>, cache_dir: Option<PathBuf>) -> Settings {
        let locale = locale.or(self.data.locale).unwrap_or_default();
        Settings {
            locale,
            base_url: self
                .data
                .base_url
                .clone()
                .unwrap_or_else(|| locale.default_base_url().to_string()),
            cache_dir: cache_dir.or_else(|| self.data.cache_dir.clone()),
            labels: self.handbook.apply(locale.handbook_labels()),
        }
    }
}
