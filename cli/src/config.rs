use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::history::DEFAULT_HISTORY_POINTS;
use crate::data::GlyphSet;
use crate::theme::ThemeColors;

pub const MIN_REFRESH_MS: u64 = 250;
pub const MAX_REFRESH_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl AppearanceMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dark" => AppearanceMode::Dark,
            "light" => AppearanceMode::Light,
            _ => AppearanceMode::Auto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppearanceMode::Auto => "Auto",
            AppearanceMode::Dark => "Dark",
            AppearanceMode::Light => "Light",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppearanceMode::Auto => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
            AppearanceMode::Light => AppearanceMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub appearance: AppearanceMode,
    pub refresh_ms: u64,
    pub icons: GlyphSet,
    pub show_graph: bool,
    pub history_points: usize,
    pub log_level: LogLevel,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            appearance: AppearanceMode::Auto,
            refresh_ms: 2000,
            icons: GlyphSet::Nerd,
            show_graph: true,
            history_points: DEFAULT_HISTORY_POINTS,
            log_level: LogLevel::Warn,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("juice")
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("juice")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())
}

impl UserConfig {
    /// Load the config file, falling back to defaults if it is missing or
    /// invalid.
    pub fn load() -> Self {
        let (config, error) = Self::load_or_default(&config_path());
        if let Some(e) = error {
            warn!(error = %e, "Using default config");
        }
        config
    }

    /// Like [`UserConfig::load_from`], but falls back to defaults and hands
    /// the error back so it can be logged once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.refresh_ms = self.refresh_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
        self.history_points = self.history_points.max(1);
        self
    }

    pub fn merge_with_args(
        &mut self,
        appearance: Option<&str>,
        refresh_ms: Option<u64>,
        icons: Option<&str>,
    ) {
        if let Some(a) = appearance {
            self.appearance = AppearanceMode::from_str(a);
        }
        if let Some(ms) = refresh_ms {
            self.refresh_ms = ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
        }
        if let Some(i) = icons {
            self.icons = GlyphSet::from_str(i);
        }
    }
}

pub struct RuntimeConfig {
    pub user_config: UserConfig,
    system_is_dark: bool,
}

impl RuntimeConfig {
    pub fn new(user_config: UserConfig) -> Self {
        Self {
            user_config,
            system_is_dark: detect_terminal_dark_mode(),
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        match self.user_config.appearance {
            AppearanceMode::Auto => self.system_is_dark,
            AppearanceMode::Dark => true,
            AppearanceMode::Light => false,
        }
    }

    pub fn theme(&self) -> ThemeColors {
        if self.is_dark_mode() {
            ThemeColors::dark()
        } else {
            ThemeColors::light()
        }
    }

    pub fn cycle_appearance(&mut self) {
        self.user_config.appearance = self.user_config.appearance.next();
        self.persist();
    }

    pub fn set_icons(&mut self, icons: GlyphSet) {
        self.user_config.icons = icons;
        self.persist();
    }

    pub fn toggle_graph(&mut self) {
        self.user_config.show_graph = !self.user_config.show_graph;
        self.persist();
    }

    pub fn appearance_label(&self) -> &'static str {
        self.user_config.appearance.label()
    }

    fn persist(&self) {
        if let Err(e) = self.user_config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }
}

/// Reads `COLORFGBG` ("fg;bg"); a light background is color 7 or 15.
fn detect_terminal_dark_mode() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .map(is_dark_colorfgbg)
        .unwrap_or(true)
}

fn is_dark_colorfgbg(value: &str) -> bool {
    match value.rsplit(';').next().and_then(|bg| bg.trim().parse::<u8>().ok()) {
        Some(7) | Some(15) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = UserConfig::parse("icons = \"ascii\"\nrefresh_ms = 1000\n").unwrap();

        assert_eq!(
            config,
            UserConfig {
                icons: GlyphSet::Ascii,
                refresh_ms: 1000,
                ..UserConfig::default()
            }
        );
    }

    #[test]
    fn test_invalid_config_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("juice-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "refresh_ms = \"soon\"").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_config_falls_back_with_error() {
        let dir = std::env::temp_dir().join(format!("juice-config-bad-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "icons = [").unwrap();

        let (config, error) = UserConfig::load_or_default(&path);
        assert_eq!(config, UserConfig::default());
        assert!(matches!(error, Some(ConfigError::Parse { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("juice-config-rt-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let config = UserConfig {
            appearance: AppearanceMode::Light,
            show_graph: false,
            log_level: LogLevel::Debug,
            ..UserConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(UserConfig::load_from(&path).unwrap(), config);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("juice-definitely-missing").join("config.toml");
        assert_eq!(UserConfig::load_from(&path).unwrap(), UserConfig::default());
    }

    #[test]
    fn test_refresh_is_clamped() {
        let config = UserConfig::parse("refresh_ms = 1").unwrap().normalized();
        assert_eq!(config.refresh_ms, MIN_REFRESH_MS);

        let mut config = UserConfig::default();
        config.merge_with_args(Some("dark"), Some(999_999), Some("ascii"));
        assert_eq!(config.refresh_ms, MAX_REFRESH_MS);
        assert_eq!(config.appearance, AppearanceMode::Dark);
        assert_eq!(config.icons, GlyphSet::Ascii);
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("nonsense"), LogLevel::Warn);
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert!(is_dark_colorfgbg("15;0"));
        assert!(!is_dark_colorfgbg("0;15"));
        assert!(!is_dark_colorfgbg("0;default;7"));
        assert!(is_dark_colorfgbg("garbage"));
    }
}
