//! Configuration for the churn form.
//!
//! The config file lives at `~/.churn/config.toml`. Every section is optional;
//! [`Settings::resolve`] layers environment variables over the file and the
//! file over built-in defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

mod persist;
mod theme;

pub use persist::{persist_theme_preset, persist_theme_preset_at};
pub use theme::{
    ColorOverrides, ColorParseError, HexColor, ThemeColors, ThemePreset, ThemeSettings,
    UnknownPreset,
};

/// Environment variable overriding `[model] path`.
pub const MODEL_PATH_ENV: &str = "CHURN_MODEL_PATH";
/// Environment variable overriding `[theme] preset`.
pub const THEME_ENV: &str = "CHURN_THEME";
/// Model artifact used when neither the environment nor the config names one.
pub const DEFAULT_MODEL_PATH: &str = "best_XGB_model.json";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChurnConfig {
    pub app: Option<AppConfig>,
    pub model: Option<ModelConfig>,
    pub theme: Option<ThemeConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for focus markers and slider tracks.
    #[serde(default)]
    pub ascii_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
    /// Path to the XGBoost JSON model. Relative paths resolve against the
    /// working directory.
    pub path: Option<PathBuf>,
}

/// `[theme]` section.
///
/// ```toml
/// [theme]
/// preset = "dark"
/// accent = "#FF8800"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ThemeConfig {
    pub preset: Option<ThemePreset>,
    pub background: Option<String>,
    pub accent: Option<String>,
    pub text: Option<String>,
}

impl ChurnConfig {
    /// Load `~/.churn/config.toml`. A missing file (or home directory) is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(Some(config))
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".churn").join("config.toml"))
}

/// Effective settings after layering env > config > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ascii_only: bool,
    pub model_path: PathBuf,
    pub theme: ThemeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ascii_only: false,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            theme: ThemeSettings::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    #[must_use]
    pub fn from_env(config: Option<&ChurnConfig>) -> Self {
        Self::resolve(config, |key| env::var(key).ok())
    }

    /// Resolve settings with an injectable environment lookup.
    ///
    /// Invalid colors or presets are logged and skipped; they never prevent
    /// startup.
    pub fn resolve(config: Option<&ChurnConfig>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(app) = config.and_then(|c| c.app.as_ref()) {
            settings.ascii_only = app.ascii_only;
        }

        if let Some(path) = config
            .and_then(|c| c.model.as_ref())
            .and_then(|m| m.path.clone())
        {
            settings.model_path = path;
        }
        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            settings.model_path = PathBuf::from(path);
        }

        if let Some(theme) = config.and_then(|c| c.theme.as_ref()) {
            if let Some(preset) = theme.preset {
                settings.theme.preset = preset;
            }
            settings.theme.overrides = ColorOverrides {
                background: parse_override("background", theme.background.as_deref()),
                accent: parse_override("accent", theme.accent.as_deref()),
                text: parse_override("text", theme.text.as_deref()),
            };
        }
        if let Some(raw) = lookup(THEME_ENV) {
            match raw.parse::<ThemePreset>() {
                Ok(preset) => settings.theme.preset = preset,
                Err(err) => tracing::warn!("Ignoring {THEME_ENV}: {err}"),
            }
        }

        settings
    }
}

fn parse_override(name: &str, raw: Option<&str>) -> Option<HexColor> {
    let raw = raw?;
    match raw.parse::<HexColor>() {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!("Ignoring [theme] {name}: {err}");
            None
        }
    }
}
