// rulecraft-core/src/infrastructure/adapters/sample_validator.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::validation::ValidationReport;
use crate::ports::{ServiceError, TableDataProvider, ValidationExecutor, ValidationRequest};

/// Deterministic validation engine: a fixed share of the table's sample rows
/// pass, the first `floor(total * pass_ratio)` of them.
pub struct SampleValidationExecutor {
    tables: Arc<dyn TableDataProvider>,
    pass_ratio: f64,
}

impl SampleValidationExecutor {
    pub fn new(tables: Arc<dyn TableDataProvider>, pass_ratio: f64) -> Self {
        Self {
            tables,
            pass_ratio: pass_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn pass_ratio(&self) -> f64 {
        self.pass_ratio
    }
}

#[async_trait]
impl ValidationExecutor for SampleValidationExecutor {
    #[instrument(skip(self, request), fields(table = %request.table_name, column = %request.column_name))]
    async fn validate(&self, request: &ValidationRequest) -> Result<ValidationReport, ServiceError> {
        if request.sql_query.trim().is_empty() {
            return Err(ServiceError::ValidationFailed("empty query".into()));
        }
        let table = self
            .tables
            .fetch_table(&request.table_name)
            .await
            .map_err(|e| ServiceError::ValidationFailed(e.to_string()))?;
        if !table.has_column(&request.column_name) {
            return Err(ServiceError::ValidationFailed(format!(
                "column '{}' does not exist in '{}'",
                request.column_name, request.table_name
            )));
        }
        if !request
            .sql_query
            .to_lowercase()
            .contains(&request.column_name.to_lowercase())
        {
            return Err(ServiceError::ValidationFailed(format!(
                "query does not reference column '{}'",
                request.column_name
            )));
        }

        let total = table.row_count();
        // Epsilon floor: 50 * 0.94 must give 47, not 46.
        let passing = ((total as f64 * self.pass_ratio) + 1e-9).floor() as usize;
        let passing: Vec<usize> = (0..passing.min(total)).collect();
        debug!(total, passed = passing.len(), "Sample validated");
        Ok(ValidationReport::from_passing_rows(total, &passing))
    }
}
