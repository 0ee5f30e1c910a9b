// rulecraft-core/src/domain/rule/suggestion.rs

use serde::{Deserialize, Serialize};

use super::RuleCategory;

/// Provider-supplied candidate rule. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSuggestion {
    pub rule: String,
    pub description: String,
    pub category: RuleCategory,
}

impl RuleSuggestion {
    pub fn new(
        rule: impl Into<String>,
        description: impl Into<String>,
        category: RuleCategory,
    ) -> Self {
        Self {
            rule: rule.into(),
            description: description.into(),
            category,
        }
    }
}
