// rulecraft-core/src/infrastructure/adapters/suggestion_catalog.rs
//
// Type-aware suggestion catalogue standing in for the AI suggestion service.
// Suggestions are phrased so the template converter understands them.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::rule::{RuleCategory, RuleSuggestion};
use crate::domain::table::{ColumnProfile, TableData};
use crate::ports::{ServiceError, SuggestionProvider, SuggestionRequest, TableDataProvider};

/// Columns with at most this many distinct sampled values get a "one of" rule.
const MAX_ENUM_VALUES: usize = 8;

pub struct CatalogSuggestionProvider {
    tables: Arc<dyn TableDataProvider>,
}

impl CatalogSuggestionProvider {
    pub fn new(tables: Arc<dyn TableDataProvider>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SuggestionProvider for CatalogSuggestionProvider {
    #[instrument(skip(self, request), fields(table = %request.table_name, column = %request.column_name))]
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<RuleSuggestion>, ServiceError> {
        let table = self
            .tables
            .fetch_table(&request.table_name)
            .await
            .map_err(|e| ServiceError::SuggestionsUnavailable(e.to_string()))?;
        let profile = table.column(&request.column_name).ok_or_else(|| {
            ServiceError::SuggestionsUnavailable(format!(
                "column '{}' does not exist in '{}'",
                request.column_name, request.table_name
            ))
        })?;

        let existing: BTreeSet<String> = request
            .existing_rules
            .iter()
            .map(|r| r.trim().to_lowercase())
            .collect();
        let suggestions: Vec<RuleSuggestion> = catalogue(&table, profile)
            .into_iter()
            .filter(|s| !existing.contains(&s.rule.to_lowercase()))
            .collect();
        debug!(count = suggestions.len(), "Suggestions built");
        Ok(suggestions)
    }
}

fn catalogue(table: &TableData, profile: &ColumnProfile) -> Vec<RuleSuggestion> {
    let column = profile.name.as_str();
    let values = table.column_values(column);
    let mut out = vec![RuleSuggestion::new(
        format!("{} should not be null", column),
        "Ensure data completeness by identifying missing values",
        if profile.null_count.unwrap_or(0) > 0 {
            RuleCategory::Error
        } else {
            RuleCategory::Warning
        },
    )];

    if profile.looks_like_key() {
        out.push(RuleSuggestion::new(
            format!("{} should be unique", column),
            "Every identifier must appear exactly once",
            RuleCategory::Error,
        ));
    }

    if profile.is_numeric() {
        if let Some((low, high)) = numeric_bounds(&values) {
            out.push(RuleSuggestion::new(
                format!("{} should be between {} and {}", column, low, high),
                "Detect values that fall outside normal ranges",
                RuleCategory::Info,
            ));
        }
        out.push(RuleSuggestion::new(
            format!("{} should be non-negative", column),
            "Negative readings usually point at a faulty source",
            RuleCategory::Warning,
        ));
    } else {
        let distinct: BTreeSet<&str> = values.iter().filter_map(|v| v.as_str()).collect();
        if !distinct.is_empty() && distinct.len() <= MAX_ENUM_VALUES && !profile.looks_like_key() {
            let list: Vec<&str> = distinct.into_iter().collect();
            out.push(RuleSuggestion::new(
                format!("{} should be one of {}", column, list.join(", ")),
                "Check if all values follow the expected format pattern",
                RuleCategory::Error,
            ));
        } else if let Some(prefix) = common_prefix(&values) {
            out.push(RuleSuggestion::new(
                format!("{} should match pattern '{}%'", column, prefix),
                "Validate format consistency",
                RuleCategory::Warning,
            ));
        }
    }
    out
}

/// Floor of the minimum and ceiling of the maximum sampled value.
fn numeric_bounds(values: &[&Value]) -> Option<(i64, i64)> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
        .collect();
    let min = numbers.iter().copied().reduce(f64::min)?;
    let max = numbers.iter().copied().reduce(f64::max)?;
    Some((min.floor() as i64, max.ceil() as i64))
}

/// Alphabetic prefix shared by every sampled string (e.g. `MTR_`).
fn common_prefix(values: &[&Value]) -> Option<String> {
    let strings: Vec<&str> = values.iter().filter_map(|v| v.as_str()).collect();
    let first = strings.first()?;
    let prefix: String = first
        .chars()
        .take_while(|c| !c.is_ascii_digit())
        .collect();
    if prefix.is_empty() || !strings.iter().all(|s| s.starts_with(&prefix)) {
        return None;
    }
    Some(prefix)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FixtureTableProvider;
    use crate::infrastructure::fixtures;

    fn provider() -> CatalogSuggestionProvider {
        CatalogSuggestionProvider::new(Arc::new(FixtureTableProvider::new(vec![
            fixtures::meter_data(),
        ])))
    }

    async fn suggest(column: &str, existing: Vec<String>) -> Vec<RuleSuggestion> {
        provider()
            .suggest(&SuggestionRequest {
                table_name: "meter_data".into(),
                column_name: column.into(),
                existing_rules: existing,
            })
            .await
            .unwrap()
    }

    fn rules(suggestions: &[RuleSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.rule.as_str()).collect()
    }

    #[tokio::test]
    async fn test_numeric_column_gets_range() {
        let suggestions = suggest("consumption", vec![]).await;
        assert_eq!(
            rules(&suggestions),
            vec![
                "consumption should not be null",
                "consumption should be between 100 and 600",
                "consumption should be non-negative",
            ]
        );
        assert_eq!(suggestions[0].category, RuleCategory::Error);
    }

    #[tokio::test]
    async fn test_low_cardinality_column_gets_value_list() {
        let suggestions = suggest("customer_type", vec![]).await;
        assert!(rules(&suggestions).contains(
            &"customer_type should be one of Commercial, Government, Industrial, Residential"
        ));
    }

    #[tokio::test]
    async fn test_key_and_prefixed_columns() {
        let id = suggest("id", vec![]).await;
        assert!(rules(&id).contains(&"id should be unique"));
        assert_eq!(id[0].category, RuleCategory::Warning);

        let meter = suggest("meter_id", vec![]).await;
        assert!(rules(&meter).contains(&"meter_id should match pattern 'MTR_%'"));
    }

    #[tokio::test]
    async fn test_existing_rules_are_skipped() {
        let suggestions = suggest("pincode", vec!["Pincode should not be null".into()]).await;
        assert!(!rules(&suggestions).contains(&"pincode should not be null"));
    }

    #[tokio::test]
    async fn test_unknown_column_is_unavailable() {
        let err = provider()
            .suggest(&SuggestionRequest {
                table_name: "meter_data".into(),
                column_name: "ghost".into(),
                existing_rules: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::SuggestionsUnavailable(_)));
    }
}
