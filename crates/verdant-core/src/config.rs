//! Configuration management for Verdant.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/verdant/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote AI backend settings
    pub backend: BackendConfig,
    /// Voice command settings
    pub voice: VoiceConfig,
    /// Health analysis settings
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `VERDANT_BACKEND_URL`: Override the AI backend base URL
    /// - `VERDANT_TIMEOUT_SECS`: Override the request timeout
    /// - `VERDANT_VOICE_ENABLED`: Override voice availability (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("VERDANT_BACKEND_URL") {
            if !val.is_empty() {
                tracing::debug!("Override backend.base_url from env: {}", val);
                config.backend.base_url = val;
            }
        }

        if let Ok(val) = std::env::var("VERDANT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                tracing::debug!("Override backend.timeout_secs from env: {}", secs);
                config.backend.timeout_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("VERDANT_VOICE_ENABLED") {
            if let Ok(enabled) = val.parse() {
                tracing::debug!("Override voice.enabled from env: {}", enabled);
                config.voice.enabled = enabled;
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/verdant/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("app", "verdant", "verdant").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Remote AI backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the AI capability backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.verdant.app".to_string(),
            timeout_secs: 30,
            user_agent: "Verdant/0.1.0 (+https://github.com/verdant-app/verdant)".to_string(),
        }
    }
}

/// Voice command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Whether voice commands are enabled at all (a disabled platform
    /// degrades gracefully rather than failing initialization)
    pub enabled: bool,
    /// Context tag submitted alongside transcripts for intent interpretation
    pub context_tag: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            context_tag: "plant_care".to_string(),
        }
    }
}

/// Health analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Identification confidence above which the health score earns a flat bonus
    pub identification_bonus_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            identification_bonus_threshold: 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend.base_url, "https://api.verdant.app");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.voice.enabled);
        assert_eq!(config.voice.context_tag, "plant_care");
        assert!((config.analysis.identification_bonus_threshold - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[voice]"));
        assert!(toml_str.contains("[analysis]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.backend.base_url = "https://staging.verdant.app".to_string();
        config.voice.enabled = false;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded_contents = fs::read_to_string(&config_path).expect("read config file");
        let loaded: AppConfig = toml::from_str(&loaded_contents).expect("parse loaded config");

        assert_eq!(loaded.backend.base_url, "https://staging.verdant.app");
        assert!(!loaded.voice.enabled);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("VERDANT_TIMEOUT_SECS", "90");

        // Can't exercise load_with_env directly since it reads the real
        // config path, but the override logic is the same
        let mut config = AppConfig::default();
        if let Ok(val) = std::env::var("VERDANT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.backend.timeout_secs = secs;
            }
        }
        assert_eq!(config.backend.timeout_secs, 90);

        std::env::remove_var("VERDANT_TIMEOUT_SECS");
    }

    #[test]
    fn test_partial_config() {
        // Partial TOML files pick up defaults for everything unspecified
        let toml_str = r#"
[voice]
enabled = false
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert!(!config.voice.enabled);
        assert_eq!(config.voice.context_tag, "plant_care");
        assert_eq!(config.backend.timeout_secs, 30);
    }
}
