// rulecraft-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(rulecraft::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(rulecraft::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(rulecraft::infra::json))]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(
        code(rulecraft::infra::config),
        help("Check rulecraft.yaml and the RULECRAFT_* environment variables.")
    )]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(rulecraft::infra::config_missing))]
    ConfigNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(rulecraft::infra::template),
        help("Check the SQL template syntax ({{ ... }}).")
    )]
    TemplateError(#[from] minijinja::Error),
}

impl From<validator::ValidationErrors> for InfrastructureError {
    fn from(err: validator::ValidationErrors) -> Self {
        InfrastructureError::ConfigError(err.to_string())
    }
}
