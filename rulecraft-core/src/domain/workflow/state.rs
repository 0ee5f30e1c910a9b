// rulecraft-core/src/domain/workflow/state.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of the authoring workflow. Derived from the session, never stored.
// Ordered: every step implies the previous ones, so `state >= SqlGenerated` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    NoTable,
    TableSelected,
    ColumnSelected,
    SqlGenerated,
    Validated,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTable => "no_table",
            Self::TableSelected => "table_selected",
            Self::ColumnSelected => "column_selected",
            Self::SqlGenerated => "sql_generated",
            Self::Validated => "validated",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The asynchronous steps. At most one of each may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Suggestions,
    Conversion,
    Validation,
    Submission,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Suggestions => "suggestion",
            Self::Conversion => "SQL conversion",
            Self::Validation => "validation",
            Self::Submission => "submission",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_ordering() {
        assert!(WorkflowState::NoTable < WorkflowState::TableSelected);
        assert!(WorkflowState::ColumnSelected < WorkflowState::SqlGenerated);
        assert!(WorkflowState::SqlGenerated < WorkflowState::Validated);
    }
}
