// rulecraft-core/src/domain/rule/mod.rs

pub mod category;
pub mod filter;
pub mod record;
pub mod suggestion;

pub use category::RuleCategory;
pub use filter::RuleFilter;
pub use record::{NewRule, RuleId, RuleRecord, validation_sql_for};
pub use suggestion::RuleSuggestion;
