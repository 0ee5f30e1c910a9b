// rulecraft-core/src/domain/error.rs

use crate::domain::workflow::Operation;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Column '{column}' does not exist in table '{table}'")]
    #[diagnostic(
        code(rulecraft::domain::invalid_column),
        help("Pick one of the columns listed by `rulecraft inspect --table {table}`.")
    )]
    InvalidColumn { table: String, column: String },

    #[error("No {0} selected")]
    #[diagnostic(
        code(rulecraft::domain::missing_selection),
        help("Select a table and a column before working on a rule.")
    )]
    MissingSelection(&'static str),

    #[error("Incomplete draft: {0}")]
    #[diagnostic(
        code(rulecraft::domain::incomplete_draft),
        help("Complete all steps: rule description, SQL conversion, and validation.")
    )]
    IncompleteDraft(String),

    #[error("No SQL query to validate")]
    #[diagnostic(
        code(rulecraft::domain::no_sql),
        help("Convert the rule to SQL first.")
    )]
    NoSqlToValidate,

    #[error("Unknown rule category: '{0}'")]
    #[diagnostic(
        code(rulecraft::domain::invalid_category),
        help("Valid categories are: info, warning, error.")
    )]
    InvalidCategory(String),

    #[error("A {0} request is already in flight")]
    #[diagnostic(code(rulecraft::domain::pending))]
    OperationPending(Operation),

    #[error("Inconsistent validation result: {pass_count} passing rows out of {total_rows}")]
    #[diagnostic(code(rulecraft::domain::inconsistent_outcome))]
    InconsistentOutcome { total_rows: usize, pass_count: usize },
}
