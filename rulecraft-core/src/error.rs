// rulecraft-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::error::ServiceError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum RuleCraftError {
    // --- ERREURS DU DOMAINE (préconditions du workflow) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS DES SERVICES EXTERNES (conversion, validation, registre) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Service(#[from] ServiceError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl RuleCraftError {
    /// Precondition failures are reported before any service is contacted.
    pub fn is_precondition(&self) -> bool {
        matches!(self, RuleCraftError::Domain(_))
    }
}

impl From<std::io::Error> for RuleCraftError {
    fn from(err: std::io::Error) -> Self {
        RuleCraftError::Infrastructure(InfrastructureError::Io(err))
    }
}
