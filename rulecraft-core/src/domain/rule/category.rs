// rulecraft-core/src/domain/rule/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

// Closed set: anything outside these three is rejected at the boundary (FromStr / serde).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    #[default]
    Info,
    Warning,
    Error,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 3] = [Self::Info, Self::Warning, Self::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Short label used next to the category badge.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Info => "Informational check",
            Self::Warning => "Data quality concern",
            Self::Error => "Critical data issue",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}
