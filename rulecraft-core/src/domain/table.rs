// rulecraft-core/src/domain/table.rs

use serde::{Deserialize, Serialize};

/// Column metadata as exposed by the table data provider, with optional statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_values: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_count: Option<u64>,
}

impl ColumnProfile {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            total_values: None,
            unique_values: None,
            null_count: None,
        }
    }

    pub fn with_stats(mut self, total: u64, unique: u64, nulls: u64) -> Self {
        self.total_values = Some(total);
        self.unique_values = Some(unique);
        self.null_count = Some(nulls);
        self
    }

    /// Share of null values, 0.0 when statistics are missing.
    pub fn null_percentage(&self) -> f64 {
        ratio(self.null_count, self.total_values)
    }

    /// Share of distinct values, 0.0 when statistics are missing.
    pub fn unique_percentage(&self) -> f64 {
        ratio(self.unique_values, self.total_values)
    }

    pub fn is_numeric(&self) -> bool {
        let t = self.data_type.to_uppercase();
        ["INT", "DECIMAL", "NUMERIC", "FLOAT", "DOUBLE", "REAL"]
            .iter()
            .any(|k| t.contains(k))
    }

    /// Every value distinct, according to the column statistics.
    pub fn looks_like_key(&self) -> bool {
        matches!(
            (self.unique_values, self.total_values),
            (Some(u), Some(t)) if t > 0 && u == t
        )
    }
}

fn ratio(part: Option<u64>, total: Option<u64>) -> f64 {
    match (part, total) {
        (Some(p), Some(t)) if p > 0 && t > 0 => p as f64 / t as f64 * 100.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub name: String,
    pub columns: Vec<ColumnProfile>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl TableData {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Sampled values of one column, in row order. Missing cells read as null.
    pub fn column_values(&self, name: &str) -> Vec<&serde_json::Value> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&serde_json::Value::Null))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Entry of the table picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
