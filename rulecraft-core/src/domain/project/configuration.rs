// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::rule::RuleRecord;
use crate::domain::table::TableData;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "project name cannot be empty"))]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[validate(nested)]
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Extra fixture tables served by the table data provider.
    #[serde(default)]
    pub tables: Vec<TableData>,

    /// Seed rules loaded into the in-memory registry.
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "rulecraft".to_string(),
            version: default_version(),
            workflow: WorkflowConfig::default(),
            validation: ValidationConfig::default(),
            tables: Vec::new(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkflowConfig {
    /// Any edit of the rule text drops the generated SQL.
    #[serde(rename = "text-edit-clears-sql", default = "default_true")]
    pub text_edit_clears_sql: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            text_edit_clears_sql: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ValidationConfig {
    /// Share of sampled rows reported as passing by the sample validator.
    #[validate(range(min = 0.0, max = 1.0, message = "pass-ratio must be within 0.0..=1.0"))]
    #[serde(rename = "pass-ratio", default = "default_pass_ratio")]
    pub pass_ratio: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            pass_ratio: default_pass_ratio(),
        }
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_true() -> bool {
    true
}
fn default_pass_ratio() -> f64 {
    0.94
}
