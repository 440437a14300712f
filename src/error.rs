//! Unified error type hierarchy for Debugfolio
//!
//! Provides structured error handling with ConfigError, PortfolioError,
//! ExportError, and AppError.

use std::io;
use thiserror::Error;

/// Settings file parsing and persistence errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Portfolio data loading and validation errors.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Portfolio file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in portfolio: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid permission string: {0}")]
    InvalidPermissions(String),

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    #[error("Skill '{skill}' references unknown project '{project}'")]
    DanglingReference { skill: String, project: String },

    #[error("Skill level out of range for '{0}' (expected 0-100)")]
    LevelOutOfRange(String),

    #[error("Portfolio validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error while reading portfolio: {0}")]
    IoError(#[from] io::Error),
}

/// Resume dump export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize resume dump: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write resume dump to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Global error type for user-facing reporting
///
/// Cloneable so it can be parked in UI state and rendered in the error banner.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Settings persist or deserialize error
    #[error("Settings error: {0}")]
    Settings(String),

    /// Portfolio data could not be loaded
    #[error("Portfolio error: {0}")]
    Portfolio(String),

    /// Resume export failed
    #[error("Export error: {0}")]
    Export(String),

    /// File I/O error (read/write/delete)
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Settings(msg) => format!("Settings error: {}", msg),
            AppError::Portfolio(msg) => format!("Could not load portfolio data: {}", msg),
            AppError::Export(msg) => format!("Resume dump failed: {}", msg),
            AppError::Io(msg) => format!("File operation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Settings(e.to_string())
    }
}

impl From<PortfolioError> for AppError {
    fn from(e: PortfolioError) -> Self {
        AppError::Portfolio(e.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

/// Top-level result type for operations that may fail.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
