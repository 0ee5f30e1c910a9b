// rulecraft-core/src/domain/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::rule::RuleSuggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<RuleSuggestion>,
}

impl ChatMessage {
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions: Vec::new(),
        }
    }

    pub fn assistant(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<RuleSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }
}
