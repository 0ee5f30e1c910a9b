// rulecraft-core/src/ports/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Failures reported by the external services behind the ports.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{0} not found")]
    #[diagnostic(code(rulecraft::service::not_found))]
    NotFound(String),

    #[error("SQL conversion failed: {0}")]
    #[diagnostic(
        code(rulecraft::service::conversion),
        help("Rephrase the rule, e.g. \"<column> should be between 0 and 100\".")
    )]
    ConversionFailed(String),

    #[error("Validation failed: {0}")]
    #[diagnostic(code(rulecraft::service::validation))]
    ValidationFailed(String),

    #[error("Could not persist rule: {0}")]
    #[diagnostic(code(rulecraft::service::persist))]
    PersistFailed(String),

    #[error("Suggestion service error: {0}")]
    #[diagnostic(code(rulecraft::service::suggestions))]
    SuggestionsUnavailable(String),
}
