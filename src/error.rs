use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not start browser session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("Element not found: {target}")]
    ElementNotFound { target: String },

    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    #[error("Unexpected result from `{script}`: {value}")]
    UnexpectedScriptResult { script: &'static str, value: String },

    #[error("Duplicate {table} entry: {key}")]
    Duplicate { table: &'static str, key: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    /// True when the underlying database error is a UNIQUE constraint failure.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            AppError::Duplicate { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
