use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::params::MAX_TRAVEL_DAYS;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub tui: TuiConfig,

    #[serde(skip)]
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_travel_days")]
    pub travel_days: u32,
    #[serde(default = "default_transportation")]
    pub transportation: String,
    #[serde(default = "default_accommodation")]
    pub accommodation: String,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    #[serde(default = "default_true")]
    pub auto_save: bool,
    #[serde(default)]
    pub format: PlanFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
}

impl PlanFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanFormat::Text => "text",
            PlanFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" => PlanFormat::Text,
            "json" => PlanFormat::Json,
            _ => PlanFormat::Text,
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["text", "json"]
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_travel_days() -> u32 {
    3
}

fn default_transportation() -> String {
    "public transit".to_string()
}

fn default_accommodation() -> String {
    "budget hotel".to_string()
}

fn default_output_directory() -> String {
    "./trip-plans".to_string()
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            travel_days: default_travel_days(),
            transportation: default_transportation(),
            accommodation: default_accommodation(),
            preferences: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            auto_save: true,
            format: PlanFormat::Text,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            show_coordinates: true,
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            defaults: DefaultsConfig::default(),
            output: OutputConfig::default(),
            tui: TuiConfig::default(),
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "tripagent", "trip-cli")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file or create default
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        // Backend URL from environment takes precedence over the file
        let env_base_url = std::env::var("TRIP_API_BASE_URL").ok();

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&content).context("Failed to parse config file")?;
            config.config_path = config_path;

            if let Some(url) = env_base_url {
                config.api.base_url = url;
            }

            Ok(config)
        } else {
            let mut config = Config::default();
            config.config_path = config_path;

            if let Some(url) = env_base_url {
                config.api.base_url = url;
            }

            // Create config directory and save default config
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Set a config value by key path (e.g., "api.base_url", "defaults.travel_days")
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                reqwest::Url::parse(value)
                    .with_context(|| format!("'{}' is not a valid URL", value))?;
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            "defaults.travel_days" => {
                let days: u32 = value.parse().context("Invalid number of days")?;
                if days == 0 || days > MAX_TRAVEL_DAYS {
                    anyhow::bail!("Travel days must be between 1 and {}", MAX_TRAVEL_DAYS);
                }
                self.defaults.travel_days = days;
            }
            "defaults.transportation" => self.defaults.transportation = value.to_string(),
            "defaults.accommodation" => self.defaults.accommodation = value.to_string(),
            "defaults.preferences" => {
                // Comma-separated list, e.g. "food, history, art"
                self.defaults.preferences = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "output.directory" => self.output.directory = value.to_string(),
            "output.auto_save" => {
                self.output.auto_save = value.parse().context("Invalid boolean value")?;
            }
            "output.format" => {
                self.output.format = PlanFormat::from_str(value);
            }
            "tui.show_coordinates" => {
                self.tui.show_coordinates = value.parse().context("Invalid boolean value")?;
            }
            "tui.theme" => self.tui.theme = value.to_string(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Get a config value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "defaults.travel_days" => Some(self.defaults.travel_days.to_string()),
            "defaults.transportation" => Some(self.defaults.transportation.clone()),
            "defaults.accommodation" => Some(self.defaults.accommodation.clone()),
            "defaults.preferences" => Some(self.defaults.preferences.join(", ")),
            "output.directory" => Some(self.output.directory.clone()),
            "output.auto_save" => Some(self.output.auto_save.to_string()),
            "output.format" => Some(self.output.format.as_str().to_string()),
            "tui.show_coordinates" => Some(self.tui.show_coordinates.to_string()),
            "tui.theme" => Some(self.tui.theme.clone()),
            _ => None,
        }
    }

    /// Get all config keys
    pub fn keys() -> &'static [&'static str] {
        &[
            "api.base_url",
            "defaults.travel_days",
            "defaults.transportation",
            "defaults.accommodation",
            "defaults.preferences",
            "output.directory",
            "output.auto_save",
            "output.format",
            "tui.show_coordinates",
            "tui.theme",
        ]
    }

    /// Common transport modes, offered for cycling in the TUI settings
    pub fn transport_modes() -> &'static [&'static str] {
        &[
            "public transit",
            "walking",
            "driving",
            "cycling",
            "mixed",
        ]
    }

    /// Common accommodation tiers
    pub fn accommodation_types() -> &'static [&'static str] {
        &[
            "hostel",
            "budget hotel",
            "boutique hotel",
            "luxury hotel",
            "apartment",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.defaults.travel_days, 3);
        assert_eq!(config.defaults.transportation, "public transit");
        assert!(config.defaults.preferences.is_empty());
        assert!(config.output.auto_save);
        assert_eq!(config.output.format, PlanFormat::Text);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut config = Config::default();

        config.set("defaults.travel_days", "7").unwrap();
        assert_eq!(config.get("defaults.travel_days").as_deref(), Some("7"));

        config.set("defaults.preferences", "food, history,,art").unwrap();
        assert_eq!(
            config.defaults.preferences,
            vec!["food", "history", "art"]
        );
        assert_eq!(
            config.get("defaults.preferences").as_deref(),
            Some("food, history, art")
        );
    }

    #[test]
    fn set_rejects_invalid_base_url() {
        let mut config = Config::default();
        assert!(config.set("api.base_url", "not a url").is_err());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn set_normalizes_base_url_trailing_slash() {
        let mut config = Config::default();
        config.set("api.base_url", "http://10.0.0.5:8000/api/").unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn set_rejects_out_of_range_days() {
        let mut config = Config::default();
        assert!(config.set("defaults.travel_days", "0").is_err());
        assert!(config.set("defaults.travel_days", "31").is_err());
        assert!(config.set("defaults.travel_days", "abc").is_err());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("api.retries", "3").is_err());
    }

    #[test]
    fn config_survives_toml_round_trip() {
        let mut config = Config::default();
        config.set("defaults.preferences", "nature, photography").unwrap();
        config.set("output.format", "json").unwrap();

        let toml_text = toml::to_string_pretty(&config).unwrap();
        let reloaded: Config = toml::from_str(&toml_text).unwrap();

        assert_eq!(reloaded.api.base_url, config.api.base_url);
        assert_eq!(reloaded.defaults.preferences, config.defaults.preferences);
        assert_eq!(reloaded.output.format, PlanFormat::Json);
    }

    #[test]
    fn save_writes_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.config_path = dir.path().join("nested").join("config.toml");
        config.save().unwrap();

        let content = fs::read_to_string(&config.config_path).unwrap();
        assert!(content.contains("http://localhost:8000/api"));
    }
}
