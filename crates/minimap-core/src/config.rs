use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::geometry::MIN_SLIDER_HEIGHT;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub minimap: MinimapConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files are written below it)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Minimap geometry and behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimapConfig {
    /// Lower bound for the slider height, in minimap units
    #[serde(default = "default_min_slider_height")]
    pub min_slider_height: f64,
    /// Minimap width in terminal columns
    #[serde(default = "default_minimap_width")]
    pub width: u16,
    /// Show the minimap on startup
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Quiet period after a change to the viewed file before it is
    /// reloaded, so bursts of writes cause a single reload
    #[serde(default = "default_watch_debounce")]
    pub watch_debounce_ms: u64,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            min_slider_height: default_min_slider_height(),
            width: default_minimap_width(),
            enabled: default_true(),
            watch_debounce_ms: default_watch_debounce(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the line number gutter
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
    /// Lines moved per j/k press or wheel notch
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_line_numbers: default_true(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("minimap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_slider_height() -> f64 {
    MIN_SLIDER_HEIGHT
}

fn default_minimap_width() -> u16 {
    16
}

fn default_watch_debounce() -> u64 {
    100
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_lines() -> u16 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write pretty TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject values the geometry engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let min = self.minimap.min_slider_height;
        if !min.is_finite() || min < 0.0 {
            return Err(crate::Error::Config(format!(
                "minimap.min_slider_height must be a non-negative number, got {}",
                min
            )));
        }
        if self.minimap.width == 0 {
            return Err(crate::Error::Config(
                "minimap.width must be at least 1 column".to_string(),
            ));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(crate::Error::Config(
                "ui.tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/minimap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("minimap")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Directory the TUI writes its log file into
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.minimap.min_slider_height, 20.0);
        assert_eq!(config.minimap.width, 16);
        assert!(config.minimap.enabled);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.general.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [minimap]
            min_slider_height = 8.0
            "#,
        )
        .unwrap();
        assert_eq!(config.minimap.min_slider_height, 8.0);
        assert_eq!(config.minimap.width, 16);
        assert!(config.ui.show_line_numbers);
    }

    #[test]
    fn test_validate_rejects_negative_slider() {
        let mut config = AppConfig::default();
        config.minimap.min_slider_height = -1.0;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));

        config.minimap.min_slider_height = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.minimap.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.minimap.width = 24;
        config.ui.show_line_numbers = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.minimap.width, 24);
        assert!(!loaded.ui.show_line_numbers);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.minimap, MinimapConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[minimap]\nwidth = 0\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(crate::Error::TomlParse(_))
        ));
    }

    #[test]
    fn test_expand_tilde() {
        let plain = expand_tilde(Path::new("/var/data"));
        assert_eq!(plain, PathBuf::from("/var/data"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/x")), home.join("x"));
        }
    }
}
