//! Centralized error types for Skyglass.
//!
//! Every crate keeps its own narrow error enum; all of them convert into
//! [`AppError`], which carries a short message suitable for the host UI.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Element registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Widget-level failures (rendering setup, lifecycle misuse) mapped from the widget crate.
    #[error("Widget error: {0}")]
    Widget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the host page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Registry(e) => e.user_message(),
            AppError::Widget(_) => "The weather widget could not be shown.",
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid icon base URL: {0}")]
    InvalidIconUrl(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::UnknownTimezone(_) => "The configured time zone is not recognized.",
            ConfigError::InvalidIconUrl(_) => "The weather icon address is invalid.",
        }
    }
}

/// Custom element registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Element already defined: {0}")]
    AlreadyDefined(String),

    #[error("Invalid element name: {0}")]
    InvalidName(String),

    #[error("Element not defined: {0}")]
    NotDefined(String),
}

impl RegistryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            RegistryError::AlreadyDefined(_) => "This component is already registered.",
            RegistryError::InvalidName(_) => "The component name is not a valid element name.",
            RegistryError::NotDefined(_) => "The requested component is not available.",
        }
    }
}
