// rulecraft-core/src/domain/rule/record.rs

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use validator::Validate;

use super::RuleCategory;
use crate::domain::error::DomainError;

pub type RuleId = u64;

/// Durable form of a submitted rule, as stored by the registry.
// Field names on the wire follow the rules API (`rule`, `rule_category`, `sql_query_usr`...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: RuleId,
    #[serde(rename = "rule")]
    pub name: String,
    pub table_name: String,
    pub column_name: String,
    #[serde(rename = "rule_category", default)]
    pub category: RuleCategory,
    #[serde(rename = "sql_query_usr")]
    pub sql_user: String,
    #[serde(rename = "sql_query_val")]
    pub sql_validation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RuleRecord {
    pub fn from_new(id: RuleId, rule: NewRule, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: rule.rule,
            table_name: rule.table_name,
            column_name: rule.column_name,
            category: rule.category,
            sql_user: rule.sql_user,
            sql_validation: rule.sql_validation,
            created_at: Some(created_at),
        }
    }

    /// The payload that would recreate this record.
    pub fn to_new_rule(&self) -> NewRule {
        NewRule {
            rule: self.name.clone(),
            table_name: self.table_name.clone(),
            column_name: self.column_name.clone(),
            category: self.category,
            sql_user: self.sql_user.clone(),
            sql_validation: self.sql_validation.clone(),
        }
    }
}

/// Create/update payload sent to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewRule {
    #[validate(length(min = 1, message = "rule description cannot be empty"))]
    pub rule: String,
    #[validate(length(min = 1, message = "table name cannot be empty"))]
    pub table_name: String,
    #[validate(length(min = 1, message = "column name cannot be empty"))]
    pub column_name: String,
    #[serde(rename = "rule_category")]
    pub category: RuleCategory,
    #[serde(rename = "sql_query_usr")]
    #[validate(length(min = 1, message = "SQL query cannot be empty"))]
    pub sql_user: String,
    #[serde(rename = "sql_query_val")]
    #[validate(length(min = 1, message = "validation SQL cannot be empty"))]
    pub sql_validation: String,
}

impl NewRule {
    pub fn check(&self) -> Result<(), DomainError> {
        if self.rule.trim().is_empty() {
            return Err(DomainError::IncompleteDraft(
                "rule description cannot be empty".into(),
            ));
        }
        self.validate()
            .map_err(|e| DomainError::IncompleteDraft(e.to_string()))
    }
}

fn re_select_star() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^\s*SELECT\s+\*\s+FROM\s+(\S+)\s+WHERE\s+(.+?)\s*;?\s*$").unwrap_or_else(
            |_| {
                // Hardcoded pattern, never fails to compile.
                Regex::new("$^").unwrap_or_else(|_| unreachable!())
            },
        )
    })
}

/// Derives the row-numbering query used by the validation engine from the
/// user-facing `SELECT * FROM t WHERE p` statement. Other shapes are kept as-is.
pub fn validation_sql_for(sql_user: &str) -> String {
    match re_select_star().captures(sql_user) {
        Some(caps) => format!(
            "SELECT row_number() OVER() as row_num FROM {} WHERE {}",
            &caps[1], &caps[2]
        ),
        None => sql_user.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_rule() -> NewRule {
        let sql = "SELECT * FROM meter_data WHERE pincode IS NOT NULL".to_string();
        NewRule {
            rule: "Pincode should not be null".into(),
            table_name: "meter_data".into(),
            column_name: "pincode".into(),
            category: RuleCategory::Warning,
            sql_validation: validation_sql_for(&sql),
            sql_user: sql,
        }
    }

    #[test]
    fn test_validation_sql_rewrites_select_star() {
        assert_eq!(
            validation_sql_for("SELECT * FROM meter_data WHERE consumption BETWEEN 0 AND 1000"),
            "SELECT row_number() OVER() as row_num FROM meter_data WHERE consumption BETWEEN 0 AND 1000"
        );
    }

    #[test]
    fn test_validation_sql_keeps_other_shapes() {
        let sql = "SELECT meter_id FROM meter_data";
        assert_eq!(validation_sql_for(sql), sql);
    }

    #[test]
    fn test_new_rule_check() {
        assert!(sample_rule().check().is_ok());

        let mut blank = sample_rule();
        blank.rule = "   ".into();
        assert!(matches!(
            blank.check(),
            Err(DomainError::IncompleteDraft(_))
        ));

        let mut no_sql = sample_rule();
        no_sql.sql_user = String::new();
        assert!(matches!(
            no_sql.check(),
            Err(DomainError::IncompleteDraft(_))
        ));
    }

    #[test]
    fn test_record_round_trips_through_api_field_names() -> anyhow::Result<()> {
        let json = r#"{
            "id": 3,
            "rule": "Customer type should be valid",
            "table_name": "meter_data",
            "column_name": "customer_type",
            "rule_category": "error",
            "sql_query_usr": "SELECT * FROM meter_data WHERE customer_type IN ('Residential')",
            "sql_query_val": "SELECT row_number() OVER() as row_num FROM meter_data WHERE customer_type IN ('Residential')",
            "created_at": "2024-01-17T09:45:00Z"
        }"#;
        let record: RuleRecord = serde_json::from_str(json)?;
        assert_eq!(record.id, 3);
        assert_eq!(record.category, RuleCategory::Error);
        assert!(record.created_at.is_some());
        assert_eq!(record.to_new_rule().rule, "Customer type should be valid");
        Ok(())
    }
}
