use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `[openweather]` table as stored on disk; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenWeatherSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings handed to the OpenWeather client.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Colombo"
///
/// [openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// City used by `show` when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    #[serde(default)]
    pub openweather: OpenWeatherSection,
}

impl Config {
    /// Load config from the platform location, or an empty default on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wearcast", "wearcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.openweather.api_key = Some(api_key.into());
    }

    pub fn set_default_city(&mut self, city: Option<String>) {
        self.default_city = city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
    }

    pub fn has_api_key(&self) -> bool {
        self.openweather.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Resolve OpenWeather settings. An explicit key (flag or environment)
    /// wins over the one stored in the file.
    pub fn openweather(&self, api_key_override: Option<&str>) -> Result<OpenWeatherConfig> {
        let api_key = api_key_override
            .or(self.openweather.api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `wearcast configure` or set WEATHER_API_KEY."
                )
            })?;

        let base_url = self
            .openweather
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENWEATHER_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout =
            Duration::from_secs(self.openweather.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(OpenWeatherConfig { api_key: api_key.to_string(), base_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn openweather_errors_without_any_key() {
        let cfg = Config::default();
        let err = cfg.openweather(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("wearcast configure"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ");

        assert!(!cfg.has_api_key());
        assert!(cfg.openweather(None).is_err());
    }

    #[test]
    fn override_key_wins_over_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY");

        let resolved = cfg.openweather(Some("ENV_KEY")).expect("key must resolve");
        assert_eq!(resolved.api_key, "ENV_KEY");

        let resolved = cfg.openweather(None).expect("key must resolve");
        assert_eq!(resolved.api_key, "FILE_KEY");
    }

    #[test]
    fn defaults_fill_in_base_url_and_timeout() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");

        let resolved = cfg.openweather(None).expect("key must resolve");
        assert_eq!(resolved.base_url, DEFAULT_OPENWEATHER_BASE_URL);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.openweather.base_url = Some("http://localhost:8080/".into());

        let resolved = cfg.openweather(None).expect("key must resolve");
        assert_eq!(resolved.base_url, "http://localhost:8080");
    }

    #[test]
    fn empty_default_city_is_cleared() {
        let mut cfg = Config::default();
        cfg.set_default_city(Some(" Kandy ".into()));
        assert_eq!(cfg.default_city.as_deref(), Some("Kandy"));

        cfg.set_default_city(Some("  ".into()));
        assert_eq!(cfg.default_city, None);
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY");
        cfg.set_default_city(Some("Colombo".into()));
        cfg.openweather.timeout_secs = Some(3);
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn parses_hand_written_toml() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"Galle\"\n\n[openweather]\napi_key = \"abc\"\n")
            .expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.default_city.as_deref(), Some("Galle"));
        assert_eq!(cfg.openweather.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.openweather.base_url, None);
    }

    #[test]
    fn malformed_toml_reports_the_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
