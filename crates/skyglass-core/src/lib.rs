pub mod app;
pub mod config;
pub mod error;
pub mod registry;

pub use app::App;
pub use config::{Config, FeedConfig, Units, ValidationResult, WidgetConfig, DEFAULT_ICON_BASE_URL};
pub use error::{AppError, ConfigError, RegistryError};
pub use registry::{CustomElement, ElementRegistry};

use anyhow::Result;

/// Initialize logging for a Skyglass host
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Skyglass core initialized");
    Ok(())
}
