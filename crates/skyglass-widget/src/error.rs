use skyglass_core::{AppError, ConfigError};
use thiserror::Error;

/// Failures while building or running the renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Widget lifecycle misuse
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Widget is already subscribed to a data warehouse")]
    AlreadyInitialized,

    #[error("Widget was destroyed")]
    Destroyed,
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Config(c) => AppError::Config(c),
            RenderError::Template(t) => AppError::Widget(t.to_string()),
        }
    }
}

impl From<WidgetError> for AppError {
    fn from(e: WidgetError) -> Self {
        AppError::Widget(e.to_string())
    }
}
