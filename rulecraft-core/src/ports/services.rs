// rulecraft-core/src/ports/services.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceError;
use crate::domain::rule::RuleSuggestion;
use crate::domain::validation::ValidationReport;

// --- REQUESTS (wire shapes of the rules API) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub table_name: String,
    pub column_name: String,
    #[serde(default)]
    pub existing_rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub table_name: String,
    pub column_name: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub sql_query: String,
    pub table_name: String,
    pub column_name: String,
}

// --- SERVICES ---

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest)
    -> Result<Vec<RuleSuggestion>, ServiceError>;
}

#[async_trait]
pub trait SqlConverter: Send + Sync {
    /// Natural-language rule -> SQL statement. `ConversionFailed` when it cannot.
    async fn convert(&self, request: &ConversionRequest) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait ValidationExecutor: Send + Sync {
    async fn validate(&self, request: &ValidationRequest)
    -> Result<ValidationReport, ServiceError>;
}
