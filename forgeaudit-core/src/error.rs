//! Error types for forgeaudit-core

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using forgeaudit Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for forgeaudit
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(forgeaudit::config))]
    Config(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(forgeaudit::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(forgeaudit::serde))]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    #[diagnostic(code(forgeaudit::toml))]
    Toml(#[from] toml::de::Error),

    #[error("Provider error: {0}")]
    #[diagnostic(code(forgeaudit::provider))]
    Provider(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(forgeaudit::validation))]
    Validation(String),

    #[error("Document export error: {0}")]
    #[diagnostic(code(forgeaudit::export))]
    Export(String),
}
