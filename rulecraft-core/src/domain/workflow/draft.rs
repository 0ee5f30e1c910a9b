// rulecraft-core/src/domain/workflow/draft.rs

use serde::{Deserialize, Serialize};

use crate::domain::rule::RuleCategory;

/// The in-progress rule of the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub text: String,
    pub category: RuleCategory,
    pub sql: Option<String>,
}

impl RuleDraft {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Generated SQL, if any and non-blank.
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.sql.is_none() && self.category == RuleCategory::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
