pub mod chat;
pub mod error;
pub mod project;
pub mod rule;
pub mod table;
pub mod validation;
pub mod workflow;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use rule::{NewRule, RuleCategory, RuleFilter, RuleId, RuleRecord, RuleSuggestion};
pub use table::{ColumnProfile, TableData, TableSummary};
pub use validation::{ValidationOutcome, ValidationReport};
pub use workflow::{Operation, RuleDraft, Session, SessionSnapshot, WorkflowState};
