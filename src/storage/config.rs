use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::schedule::{DayLabels, week::DEFAULT_DAY_LABELS};

const APP_DIR: &str = "weekplan";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub day_labels: Vec<String>,
    pub recency_window_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub subtitle: String,
    pub theme: String,
    pub refresh_interval_seconds: u64,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Configured labels, or the built-in ones when the list is not seven long.
    pub fn day_labels(&self) -> DayLabels {
        DayLabels::from_labels(self.schedule.day_labels.clone()).unwrap_or_else(|| {
            tracing::warn!(
                count = self.schedule.day_labels.len(),
                "day_labels must list seven days; using defaults"
            );
            DayLabels::default()
        })
    }

    pub fn recency_window_ms(&self) -> i64 {
        i64::from(self.schedule.recency_window_minutes) * 60 * 1000
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.ui.refresh_interval_seconds.max(1))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            database_path: data_dir.join("schedules.db"),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_labels: DEFAULT_DAY_LABELS.iter().map(|label| label.to_string()).collect(),
            recency_window_minutes: 5,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Đội Sửa Chữa Thí Nghiệm Điện 2".to_string(),
            subtitle: "Lịch Công Tác Tuần".to_string(),
            theme: "default".to_string(),
            refresh_interval_seconds: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_five_minute_recency_window() {
        let config = Config::default();
        assert_eq!(config.recency_window_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn default_config_refreshes_every_ten_seconds() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
    }

    #[test]
    fn default_day_labels_start_on_monday() {
        let labels = Config::default().day_labels();
        assert_eq!(labels.label(0), "Thứ Hai");
        assert_eq!(labels.label(6), "Chủ Nhật");
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [storage]
            database_path = "/tmp/weekplan/schedules.db"

            [schedule]
            day_labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            recency_window_minutes = 15

            [ui]
            title = "Field Team"
            subtitle = "Weekly Plan"
            theme = "gruvbox"
            refresh_interval_seconds = 30
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/weekplan/schedules.db"));
        assert_eq!(config.day_labels().label(2), "Wed");
        assert_eq!(config.recency_window_ms(), 15 * 60 * 1000);
        assert_eq!(config.ui.theme, "gruvbox");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml("[ui]\ntheme = \"gruvbox\"\n").unwrap();

        assert_eq!(config.ui.theme, "gruvbox");
        assert_eq!(config.ui.refresh_interval_seconds, 10);
        assert_eq!(config.schedule, ScheduleConfig::default());
    }

    #[test]
    fn wrong_label_count_falls_back_to_default_labels() {
        let config = Config::from_toml("[schedule]\nday_labels = [\"Mon\", \"Tue\"]\n").unwrap();

        assert_eq!(config.day_labels(), DayLabels::default());
    }

    #[test]
    fn zero_refresh_interval_is_clamped() {
        let config = Config::from_toml("[ui]\nrefresh_interval_seconds = 0\n").unwrap();

        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }
}
