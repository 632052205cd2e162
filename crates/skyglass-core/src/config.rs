use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default endpoint serving weather icons by code (e.g. `10d.png`)
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn/";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Widget presentation settings
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Snapshot feed settings (demo host only)
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Measurement system used for display suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// IANA time zone used for sunrise/sunset and hourly labels
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub units: Units,

    /// Base URL the icon code is appended to
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            units: Units::default(),
            icon_base_url: default_icon_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// JSON file holding the snapshot to publish
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Re-publish interval in seconds when watching the snapshot file
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
}

fn default_refresh_seconds() -> u64 {
    60
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            refresh_seconds: default_refresh_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyglass");

        Self {
            config_dir,
            widget: WidgetConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_icon_url(&mut result);

        if self.widget.timezone.parse::<chrono_tz::Tz>().is_err() {
            result.add_error(
                "widget.timezone",
                format!("Unknown time zone: {}", self.widget.timezone),
            );
        }

        if self.feed.refresh_seconds == 0 {
            result.add_warning(
                "feed.refresh_seconds",
                "Snapshot refresh disabled (0 seconds)",
            );
        } else if self.feed.refresh_seconds > 86_400 {
            result.add_warning(
                "feed.refresh_seconds",
                "Snapshot refresh interval is more than 24 hours",
            );
        }

        if let Some(path) = &self.feed.snapshot_path {
            if !path.exists() {
                result.add_warning(
                    "feed.snapshot_path",
                    format!("Path does not exist: {}", path.display()),
                );
            }
        }

        result
    }

    fn validate_icon_url(&self, result: &mut ValidationResult) {
        let field = "widget.icon_base_url";
        match Url::parse(&self.widget.icon_base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field, format!("Invalid URL: {}", e));
            }
        }
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyglass");

        Ok(config_dir.join("config.toml"))
    }
}
