//! Error types for fleet-register

use thiserror::Error;

use crate::types::{Action, Role};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Key-value slot errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("Failed to read slot '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write slot '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Role gating errors
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Role '{role}' is not allowed to {action}")]
    Denied { role: Role, action: Action },
}

/// Record consistency errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Part references unknown vehicle: {0}")]
    UnknownVehicle(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Access denied: {0}")]
    Access(#[from] AccessError),

    #[error("Invalid record: {0}")]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Photo error: {0}")]
    Photo(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Import error: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, Error>;
