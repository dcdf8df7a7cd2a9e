//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Delivery timeout must be between 1 and 60000 ms")]
    InvalidDeliveryTimeout,

    #[error("Subscriber buffer must be at least 1")]
    InvalidSubscriberBuffer,

    #[error("Invalid storage container name: {0}")]
    InvalidContainer(String),

    #[error("Upload limit must be greater than zero")]
    InvalidUploadLimit,
}
