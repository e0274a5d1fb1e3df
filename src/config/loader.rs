use super::types::Config;
use crate::error::{Result, VoxaError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the default config file, falling back to defaults on any error
    pub fn load() -> Config {
        Config::load().unwrap_or_else(|e| {
            debug!("Using default configuration: {}", e);
            Config::from_env()
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::from_env());
        }

        let mut config = ConfigLoader::load_from_path(&config_path)?;
        config.quota = config.quota.with_env_overrides();
        debug!("Loaded configuration from {}", config_path.display());

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.voxa/config.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".voxa").join("config.toml")
        } else {
            PathBuf::from(".voxa/config.toml")
        }
    }

    /// Initialize config directory and create default config
    pub fn init() -> Result<()> {
        let config_path = Self::get_config_path();

        // Create default config if it doesn't exist
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            info!("Created config at {}", config_path.display());
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<()> {
        let quota = &self.quota;
        if !(quota.warning <= quota.danger && quota.danger <= quota.exceeded) {
            return Err(VoxaError::InvalidConfig(format!(
                "Quota thresholds must be ascending, got warning={} danger={} exceeded={}",
                quota.warning, quota.danger, quota.exceeded
            )));
        }

        if self.golden_window.window_seconds <= 0.0 {
            return Err(VoxaError::InvalidConfig(
                "Golden window must be greater than 0 seconds".to_string(),
            ));
        }

        if self.golden_window.missing_response_sentinel <= self.golden_window.window_seconds {
            return Err(VoxaError::InvalidConfig(
                "Missing-response sentinel must lie outside the golden window".to_string(),
            ));
        }

        if self.sentiment.neutral >= self.sentiment.positive {
            return Err(VoxaError::InvalidConfig(
                "Neutral sentiment bound must be below the positive bound".to_string(),
            ));
        }

        if !self.sections.any_enabled() {
            return Err(VoxaError::InvalidConfig("No report sections enabled".to_string()));
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}
