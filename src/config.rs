use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::nav::TOTAL_ANGS;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub provider: ProviderConfig,
    pub navigation: NavigationConfig,
    pub keymap: KeymapConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    pub start_ang: u32,
    pub start_paused: bool,
    pub auto_advance_ms: u64,
    pub redraw_interval_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            start_ang: 1,
            start_paused: false,
            auto_advance_ms: 5_000,
            redraw_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub transliteration_lang: String,
    pub translation_lang: String,
    pub translation_source: String,
    pub shabad_memo_entries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.banidb.com/v2".to_string(),
            request_timeout_ms: 10_000,
            transliteration_lang: "en".to_string(),
            translation_lang: "en".to_string(),
            translation_source: "bdb".to_string(),
            shabad_memo_entries: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadErrorPolicy {
    /// Stay on the current verse and stop auto-advance.
    #[default]
    Halt,
    /// Move on to the following ang, bounded by `max_skip`.
    Skip,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavigationConfig {
    pub on_load_error: LoadErrorPolicy,
    pub max_skip: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            on_load_error: LoadErrorPolicy::Halt,
            max_skip: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    const MIN_AUTO_ADVANCE_MS: u64 = 1_000;

    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    pub(crate) fn sanitized(mut self) -> Self {
        self.viewer.start_ang = self.viewer.start_ang.clamp(1, TOTAL_ANGS);
        self.viewer.auto_advance_ms = self.viewer.auto_advance_ms.max(Self::MIN_AUTO_ADVANCE_MS);
        self.viewer.redraw_interval_ms = self.viewer.redraw_interval_ms.max(1);
        self.provider.request_timeout_ms = self.provider.request_timeout_ms.max(1);
        self.provider.shabad_memo_entries = self.provider.shabad_memo_entries.max(1);
        let trimmed = self.provider.base_url.trim().trim_end_matches('/');
        self.provider.base_url = if trimmed.is_empty() {
            ProviderConfig::default().base_url
        } else {
            trimmed.to_string()
        };
        if self.log.level.trim().is_empty() {
            self.log.level = LogConfig::default().level;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("GBV_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("gbv").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("gbv")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("gbv").join("config.toml"));
    }
    None
}
