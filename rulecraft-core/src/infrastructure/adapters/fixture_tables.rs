// rulecraft-core/src/infrastructure/adapters/fixture_tables.rs

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::table::{TableData, TableSummary};
use crate::ports::{ServiceError, TableDataProvider};

/// Serves in-memory tables (built-in fixtures and tables declared in `rulecraft.yaml`).
#[derive(Debug, Default)]
pub struct FixtureTableProvider {
    tables: BTreeMap<String, TableData>,
    descriptions: BTreeMap<String, String>,
}

impl FixtureTableProvider {
    /// Later tables replace earlier ones with the same name.
    pub fn new(tables: impl IntoIterator<Item = TableData>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
            descriptions: BTreeMap::new(),
        }
    }

    pub fn describe(mut self, table: &str, description: impl Into<String>) -> Self {
        self.descriptions.insert(table.to_string(), description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[async_trait]
impl TableDataProvider for FixtureTableProvider {
    async fn list_tables(&self) -> Result<Vec<TableSummary>, ServiceError> {
        Ok(self
            .tables
            .keys()
            .map(|name| TableSummary {
                name: name.clone(),
                description: self.descriptions.get(name).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_table(&self, table_name: &str) -> Result<TableData, ServiceError> {
        debug!(table = table_name, "Fetching fixture table");
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("table '{}'", table_name)))
    }
}
