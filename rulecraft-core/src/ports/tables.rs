// rulecraft-core/src/ports/tables.rs

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::table::{TableData, TableSummary};

#[async_trait]
pub trait TableDataProvider: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<TableSummary>, ServiceError>;

    /// Column metadata and a row sample. `NotFound` for unknown tables.
    async fn fetch_table(&self, table_name: &str) -> Result<TableData, ServiceError>;
}
