// rulecraft-core/src/domain/rule/filter.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{RuleCategory, RuleRecord};
use crate::domain::error::DomainError;

/// Sentinel used by filter pickers for "no restriction".
pub const ALL: &str = "all";

/// Exact-match filter over the rule registry. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFilter {
    pub table: Option<String>,
    pub column: Option<String>,
    pub category: Option<RuleCategory>,
}

fn pinned(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_string)
}

impl RuleFilter {
    /// Builds a filter from picker values, where `"all"` (or nothing) means unrestricted.
    pub fn parse(
        table: Option<&str>,
        column: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, DomainError> {
        let category = pinned(category)
            .map(|c| RuleCategory::from_str(&c))
            .transpose()?;
        Ok(Self {
            table: pinned(table),
            column: pinned(column),
            category,
        })
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_category(mut self, category: RuleCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, rule: &RuleRecord) -> bool {
        self.table.as_ref().is_none_or(|t| rule.table_name == *t)
            && self.column.as_ref().is_none_or(|c| rule.column_name == *c)
            && self.category.is_none_or(|k| rule.category == k)
    }

    pub fn apply(&self, rules: &[RuleRecord]) -> Vec<RuleRecord> {
        rules.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.table.is_none() && self.column.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule(id: u64, table: &str, column: &str, category: RuleCategory) -> RuleRecord {
        RuleRecord {
            id,
            name: format!("rule {}", id),
            table_name: table.into(),
            column_name: column.into(),
            category,
            sql_user: "SELECT 1".into(),
            sql_validation: "SELECT 1".into(),
            created_at: None,
        }
    }

    fn rules() -> Vec<RuleRecord> {
        vec![
            rule(1, "meter_data", "consumption", RuleCategory::Error),
            rule(2, "meter_data", "pincode", RuleCategory::Warning),
            rule(3, "meter_data", "customer_type", RuleCategory::Error),
            rule(4, "billing", "consumption", RuleCategory::Error),
        ]
    }

    #[test]
    fn test_table_and_category_filter_matches_both() -> anyhow::Result<()> {
        let filter = RuleFilter::parse(Some("meter_data"), None, Some("error"))?;
        let ids: Vec<u64> = filter.apply(&rules()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn test_all_sentinel_means_unrestricted() -> anyhow::Result<()> {
        let filter = RuleFilter::parse(Some("all"), Some("ALL"), Some("all"))?;
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&rules()).len(), 4);
        Ok(())
    }

    #[test]
    fn test_exact_equality_on_names() {
        let filter = RuleFilter::default().with_column("Consumption");
        assert!(filter.apply(&rules()).is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = RuleFilter::parse(None, None, Some("fatal")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCategory(_)));
    }
}
