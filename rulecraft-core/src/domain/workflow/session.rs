// rulecraft-core/src/domain/workflow/session.rs

// Pure transition logic of the authoring workflow. No I/O here: the application
// layer snapshots a `DraftContext`, calls the services, then commits through the
// `commit_*` methods which refuse results whose context has moved on.

use serde::Serialize;
use std::collections::BTreeSet;

use super::{Operation, RuleDraft, WorkflowState};
use crate::domain::error::DomainError;
use crate::domain::rule::{NewRule, RuleCategory, RuleId, RuleRecord, RuleSuggestion, validation_sql_for};
use crate::domain::table::TableData;
use crate::domain::validation::ValidationOutcome;

#[derive(Debug, Clone)]
pub struct Session {
    table: Option<TableData>,
    column: Option<String>,
    draft: RuleDraft,
    outcome: Option<ValidationOutcome>,
    editing: Option<RuleId>,
    pending: BTreeSet<Operation>,
    table_fetch: u64,
    text_edit_clears_sql: bool,
}

/// Originating context of an asynchronous call.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftContext {
    pub table: String,
    pub column: String,
    pub draft: RuleDraft,
    pub editing: Option<RuleId>,
}

/// A validated draft turned into a registry payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub context: DraftContext,
    pub rule: NewRule,
}

impl Submission {
    /// Target of an update when the draft was loaded from an existing rule.
    pub fn editing(&self) -> Option<RuleId> {
        self.context.editing
    }
}

/// Read-only view of the session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: WorkflowState,
    pub table: Option<String>,
    pub column: Option<String>,
    pub draft: RuleDraft,
    pub outcome: Option<ValidationOutcome>,
    pub editing: Option<RuleId>,
    pub pending: Vec<Operation>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Session {
    pub fn new(text_edit_clears_sql: bool) -> Self {
        Self {
            table: None,
            column: None,
            draft: RuleDraft::default(),
            outcome: None,
            editing: None,
            pending: BTreeSet::new(),
            table_fetch: 0,
            text_edit_clears_sql,
        }
    }

    // --- LECTURE ---

    pub fn state(&self) -> WorkflowState {
        match (&self.table, &self.column) {
            (None, _) => WorkflowState::NoTable,
            (Some(_), None) => WorkflowState::TableSelected,
            (Some(_), Some(_)) => {
                if self.draft.sql().is_none() {
                    WorkflowState::ColumnSelected
                } else if self.fresh_outcome().is_some() {
                    WorkflowState::Validated
                } else {
                    WorkflowState::SqlGenerated
                }
            }
        }
    }

    pub fn table(&self) -> Option<&TableData> {
        self.table.as_ref()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_ref().map(|t| t.name.as_str())
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn draft(&self) -> &RuleDraft {
        &self.draft
    }

    pub fn editing(&self) -> Option<RuleId> {
        self.editing
    }

    /// The stored outcome, only while it still describes the current table, column and SQL.
    pub fn fresh_outcome(&self) -> Option<&ValidationOutcome> {
        let (table, column, sql) = (self.table_name()?, self.column()?, self.draft.sql()?);
        self.outcome
            .as_ref()
            .filter(|o| o.is_fresh_for(table, column, sql))
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.pending.contains(&op)
    }

    pub fn text_edit_clears_sql(&self) -> bool {
        self.text_edit_clears_sql
    }

    pub fn selection(&self) -> Result<(String, String), DomainError> {
        let table = self
            .table_name()
            .ok_or(DomainError::MissingSelection("table"))?;
        let column = self.column().ok_or(DomainError::MissingSelection("column"))?;
        Ok((table.to_string(), column.to_string()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            table: self.table_name().map(str::to_string),
            column: self.column.clone(),
            draft: self.draft.clone(),
            outcome: self.fresh_outcome().cloned(),
            editing: self.editing,
            pending: self.pending.iter().copied().collect(),
        }
    }

    // --- TRANSITIONS SYNCHRONES ---

    /// A table change invalidates everything downstream.
    pub fn select_table(&mut self, table: TableData) {
        self.table = Some(table);
        self.column = None;
        self.clear_rule_context();
    }

    pub fn select_column(&mut self, name: &str) -> Result<(), DomainError> {
        let table = self
            .table
            .as_ref()
            .ok_or(DomainError::MissingSelection("table"))?;
        if !table.has_column(name) {
            return Err(DomainError::InvalidColumn {
                table: table.name.clone(),
                column: name.to_string(),
            });
        }
        self.column = Some(name.to_string());
        self.clear_rule_context();
        Ok(())
    }

    pub fn edit_text(&mut self, text: &str) -> Result<(), DomainError> {
        self.require_column()?;
        if self.draft.text == text {
            return Ok(());
        }
        self.draft.text = text.to_string();
        self.invalidate_after_text_change();
        Ok(())
    }

    pub fn set_category(&mut self, category: RuleCategory) -> Result<(), DomainError> {
        self.require_column()?;
        self.draft.category = category;
        Ok(())
    }

    pub fn apply_suggestion(&mut self, suggestion: &RuleSuggestion) -> Result<(), DomainError> {
        self.require_column()?;
        self.draft.category = suggestion.category;
        if self.draft.text != suggestion.rule {
            self.draft.text = suggestion.rule.clone();
            self.invalidate_after_text_change();
        }
        self.outcome = None;
        Ok(())
    }

    /// Drops the draft, outcome and edit target. Keeps table and column.
    pub fn reset_draft(&mut self) {
        self.draft.clear();
        self.outcome = None;
        self.editing = None;
    }

    /// Re-enters the workflow with an existing rule, straight at `SqlGenerated`.
    pub fn load_record(&mut self, table: TableData, record: &RuleRecord) -> Result<(), DomainError> {
        if table.name != record.table_name || !table.has_column(&record.column_name) {
            return Err(DomainError::InvalidColumn {
                table: record.table_name.clone(),
                column: record.column_name.clone(),
            });
        }
        self.table = Some(table);
        self.column = Some(record.column_name.clone());
        self.draft = RuleDraft {
            text: record.name.clone(),
            category: record.category,
            sql: Some(record.sql_user.clone()),
        };
        self.outcome = None;
        self.editing = Some(record.id);
        Ok(())
    }

    // --- OPÉRATIONS ASYNCHRONES : préconditions + commit ---

    /// Tags a table fetch. Only the most recently started one may commit.
    pub fn begin_table_fetch(&mut self) -> u64 {
        self.table_fetch = self.table_fetch.wrapping_add(1);
        self.table_fetch
    }

    pub fn is_latest_table_fetch(&self, ticket: u64) -> bool {
        self.table_fetch == ticket
    }

    pub fn begin(&mut self, op: Operation) -> Result<(), DomainError> {
        if !self.pending.insert(op) {
            return Err(DomainError::OperationPending(op));
        }
        Ok(())
    }

    pub fn finish(&mut self, op: Operation) {
        self.pending.remove(&op);
    }

    pub fn suggestion_context(&self) -> Result<DraftContext, DomainError> {
        self.selection()?;
        self.context()
    }

    pub fn conversion_context(&self) -> Result<DraftContext, DomainError> {
        if self.table.is_none() || self.column.is_none() {
            return Err(DomainError::IncompleteDraft(
                "select a column before converting".into(),
            ));
        }
        if !self.draft.has_text() {
            return Err(DomainError::IncompleteDraft(
                "enter a rule description first".into(),
            ));
        }
        self.context()
    }

    /// Stores generated SQL unless table, column or text changed meanwhile.
    pub fn commit_sql(&mut self, ctx: &DraftContext, sql: String) -> bool {
        if !self.same_selection(ctx) || self.draft.text != ctx.draft.text {
            return false;
        }
        self.draft.sql = Some(sql);
        self.outcome = None;
        true
    }

    pub fn validation_context(&self) -> Result<DraftContext, DomainError> {
        if self.draft.sql().is_none() {
            return Err(DomainError::NoSqlToValidate);
        }
        self.selection()?;
        self.context()
    }

    /// Stores the outcome unless table, column, text or SQL changed meanwhile.
    pub fn commit_outcome(&mut self, ctx: &DraftContext, outcome: ValidationOutcome) -> bool {
        if !self.same_selection(ctx)
            || self.draft.sql != ctx.draft.sql
            || self.draft.text != ctx.draft.text
        {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    pub fn submission(&self) -> Result<Submission, DomainError> {
        let (table, column) = self
            .selection()
            .map_err(|e| DomainError::IncompleteDraft(e.to_string()))?;
        if !self.draft.has_text() {
            return Err(DomainError::IncompleteDraft("rule description is empty".into()));
        }
        let sql = self
            .draft
            .sql()
            .ok_or_else(|| DomainError::IncompleteDraft("rule was not converted to SQL".into()))?;
        if self.fresh_outcome().is_none() {
            return Err(DomainError::IncompleteDraft(
                "rule must be validated against the current SQL".into(),
            ));
        }

        let rule = NewRule {
            rule: self.draft.text.trim().to_string(),
            table_name: table,
            column_name: column,
            category: self.draft.category,
            sql_user: sql.to_string(),
            sql_validation: validation_sql_for(sql),
        };
        rule.check()?;

        Ok(Submission {
            context: self.context()?,
            rule,
        })
    }

    /// Resets the draft after a persisted submission, unless the user moved on meanwhile.
    pub fn complete_submission(&mut self, submission: &Submission) -> bool {
        let ctx = &submission.context;
        if !self.same_selection(ctx) || self.draft != ctx.draft || self.editing != ctx.editing {
            return false;
        }
        self.reset_draft();
        true
    }

    // --- INTERNES ---

    fn context(&self) -> Result<DraftContext, DomainError> {
        let (table, column) = self.selection()?;
        Ok(DraftContext {
            table,
            column,
            draft: self.draft.clone(),
            editing: self.editing,
        })
    }

    /// Table and column are still the ones the context was taken from.
    pub fn same_selection(&self, ctx: &DraftContext) -> bool {
        self.table_name() == Some(ctx.table.as_str()) && self.column() == Some(ctx.column.as_str())
    }

    fn require_column(&self) -> Result<(), DomainError> {
        self.selection().map(|_| ())
    }

    fn invalidate_after_text_change(&mut self) {
        self.outcome = None;
        if self.text_edit_clears_sql {
            self.draft.sql = None;
        }
    }

    fn clear_rule_context(&mut self) {
        self.draft.clear();
        self.outcome = None;
        self.editing = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::ColumnProfile;
    use crate::domain::validation::ValidationReport;

    const SQL: &str = "SELECT * FROM meter_data WHERE consumption BETWEEN 0 AND 1000";

    fn meter_data() -> TableData {
        TableData {
            name: "meter_data".into(),
            columns: vec![
                ColumnProfile::new("id", "INTEGER"),
                ColumnProfile::new("consumption", "DECIMAL"),
                ColumnProfile::new("pincode", "VARCHAR"),
            ],
            rows: vec![],
        }
    }

    fn billing() -> TableData {
        TableData {
            name: "billing".into(),
            columns: vec![ColumnProfile::new("amount", "DECIMAL")],
            rows: vec![],
        }
    }

    fn outcome_for(sql: &str) -> ValidationOutcome {
        ValidationOutcome::from_report(
            ValidationReport::from_passing_rows(50, &(0..47).collect::<Vec<_>>()),
            "meter_data",
            "consumption",
            sql,
        )
        .unwrap()
    }

    /// Session walked up to `Validated` on meter_data.consumption.
    fn validated_session(clears_sql: bool) -> Session {
        let mut s = Session::new(clears_sql);
        s.select_table(meter_data());
        s.select_column("consumption").unwrap();
        s.edit_text("Consumption should be between 0 and 1000").unwrap();
        let ctx = s.conversion_context().unwrap();
        assert!(s.commit_sql(&ctx, SQL.into()));
        let ctx = s.validation_context().unwrap();
        assert!(s.commit_outcome(&ctx, outcome_for(SQL)));
        assert_eq!(s.state(), WorkflowState::Validated);
        s
    }

    #[test]
    fn test_initial_state() {
        let s = Session::default();
        assert_eq!(s.state(), WorkflowState::NoTable);
        assert!(s.draft().is_empty());
    }

    #[test]
    fn test_select_column_requires_membership() {
        let mut s = Session::default();
        assert_eq!(
            s.select_column("consumption"),
            Err(DomainError::MissingSelection("table"))
        );

        s.select_table(meter_data());
        for col in ["id", "consumption", "pincode"] {
            assert!(s.select_column(col).is_ok());
        }
        let before = s.snapshot();
        let err = s.select_column("nonexistent").unwrap_err();
        assert!(matches!(err, DomainError::InvalidColumn { .. }));
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_table_change_always_clears_draft_and_outcome() {
        for clears_sql in [true, false] {
            let mut s = validated_session(clears_sql);
            s.select_table(billing());
            assert_eq!(s.state(), WorkflowState::TableSelected);
            assert!(s.draft().is_empty());
            assert!(s.fresh_outcome().is_none());
            assert!(s.column().is_none());
        }
    }

    #[test]
    fn test_column_change_clears_draft() {
        let mut s = validated_session(true);
        s.select_column("pincode").unwrap();
        assert_eq!(s.state(), WorkflowState::ColumnSelected);
        assert!(s.draft().is_empty());
    }

    #[test]
    fn test_text_edit_discards_outcome_and_sql_by_default() {
        let mut s = validated_session(true);
        s.edit_text("new text").unwrap();
        assert!(s.fresh_outcome().is_none());
        assert!(s.draft().sql.is_none());
        assert_eq!(s.state(), WorkflowState::ColumnSelected);
    }

    #[test]
    fn test_lenient_text_edit_keeps_sql() {
        let mut s = validated_session(false);
        s.edit_text("new text").unwrap();
        assert!(s.fresh_outcome().is_none());
        assert_eq!(s.draft().sql.as_deref(), Some(SQL));
        assert_eq!(s.state(), WorkflowState::SqlGenerated);
        assert!(matches!(s.submission(), Err(DomainError::IncompleteDraft(_))));
    }

    #[test]
    fn test_identical_text_is_not_a_change() {
        let mut s = validated_session(true);
        s.edit_text("Consumption should be between 0 and 1000").unwrap();
        assert_eq!(s.state(), WorkflowState::Validated);
    }

    #[test]
    fn test_category_change_keeps_outcome() {
        let mut s = validated_session(true);
        s.set_category(RuleCategory::Error).unwrap();
        assert_eq!(s.state(), WorkflowState::Validated);
        assert_eq!(s.submission().unwrap().rule.category, RuleCategory::Error);
    }

    #[test]
    fn test_apply_suggestion_overwrites_text_and_category() {
        let mut s = validated_session(true);
        s.apply_suggestion(&RuleSuggestion::new(
            "consumption should not be null",
            "Ensure data completeness",
            RuleCategory::Warning,
        ))
        .unwrap();
        assert_eq!(s.draft().text, "consumption should not be null");
        assert_eq!(s.draft().category, RuleCategory::Warning);
        assert!(s.fresh_outcome().is_none());
        assert_eq!(s.state(), WorkflowState::ColumnSelected);
    }

    #[test]
    fn test_preconditions() {
        let mut s = Session::default();
        assert!(matches!(
            s.conversion_context(),
            Err(DomainError::IncompleteDraft(_))
        ));
        assert_eq!(s.validation_context(), Err(DomainError::NoSqlToValidate));
        assert_eq!(
            s.suggestion_context(),
            Err(DomainError::MissingSelection("table"))
        );
        assert_eq!(s.edit_text("x"), Err(DomainError::MissingSelection("table")));

        s.select_table(meter_data());
        assert_eq!(
            s.suggestion_context(),
            Err(DomainError::MissingSelection("column"))
        );
        s.select_column("consumption").unwrap();
        s.edit_text("   ").unwrap();
        assert!(matches!(
            s.conversion_context(),
            Err(DomainError::IncompleteDraft(_))
        ));
    }

    #[test]
    fn test_stale_sql_is_not_committed() {
        let mut s = Session::default();
        s.select_table(meter_data());
        s.select_column("consumption").unwrap();
        s.edit_text("Consumption should be between 0 and 1000").unwrap();
        let ctx = s.conversion_context().unwrap();

        s.edit_text("Consumption should be positive").unwrap();
        assert!(!s.commit_sql(&ctx, SQL.into()));
        assert!(s.draft().sql.is_none());
    }

    #[test]
    fn test_stale_outcome_is_not_committed() {
        let mut s = validated_session(true);
        let ctx = s.validation_context().unwrap();
        s.select_column("pincode").unwrap();
        assert!(!s.commit_outcome(&ctx, outcome_for(SQL)));
        assert!(s.fresh_outcome().is_none());
    }

    #[test]
    fn test_outcome_for_edited_text_is_not_committed_when_sql_is_kept() {
        let mut s = validated_session(false);
        let ctx = s.validation_context().unwrap();
        s.edit_text("Consumption should be positive").unwrap();

        assert!(!s.commit_outcome(&ctx, outcome_for(SQL)));
        assert_eq!(s.draft().sql.as_deref(), Some(SQL));
        assert_eq!(s.state(), WorkflowState::SqlGenerated);
        assert!(s.submission().is_err());
    }

    #[test]
    fn test_submission_requires_outcome_for_current_sql() {
        let mut s = validated_session(false);
        let ctx = s.conversion_context().unwrap();
        assert!(s.commit_sql(&ctx, "SELECT * FROM meter_data WHERE consumption > 0".into()));
        assert_eq!(s.state(), WorkflowState::SqlGenerated);
        assert!(matches!(s.submission(), Err(DomainError::IncompleteDraft(_))));
    }

    #[test]
    fn test_submission_and_completion() {
        let mut s = validated_session(true);
        let sub = s.submission().unwrap();
        assert_eq!(sub.rule.table_name, "meter_data");
        assert_eq!(sub.rule.column_name, "consumption");
        assert_eq!(sub.rule.category, RuleCategory::Info);
        assert!(sub.rule.sql_validation.starts_with("SELECT row_number()"));
        assert!(s.complete_submission(&sub));
        assert_eq!(s.state(), WorkflowState::ColumnSelected);
        assert_eq!(s.column(), Some("consumption"));
        assert!(s.draft().is_empty());
    }

    #[test]
    fn test_completion_skipped_when_draft_moved_on() {
        let mut s = validated_session(true);
        let sub = s.submission().unwrap();
        s.edit_text("another rule").unwrap();
        assert!(!s.complete_submission(&sub));
        assert_eq!(s.draft().text, "another rule");
    }

    #[test]
    fn test_load_record_enters_sql_generated() {
        let record = RuleRecord {
            id: 7,
            name: "Pincode should not be null".into(),
            table_name: "meter_data".into(),
            column_name: "pincode".into(),
            category: RuleCategory::Warning,
            sql_user: "SELECT * FROM meter_data WHERE pincode IS NOT NULL".into(),
            sql_validation: "SELECT row_number() OVER() as row_num FROM meter_data WHERE pincode IS NOT NULL".into(),
            created_at: None,
        };
        let mut s = Session::default();
        s.load_record(meter_data(), &record).unwrap();
        assert_eq!(s.state(), WorkflowState::SqlGenerated);
        assert_eq!(s.editing(), Some(7));
        assert_eq!(s.draft().category, RuleCategory::Warning);

        let mut orphan = record.clone();
        orphan.column_name = "gone".into();
        assert!(matches!(
            Session::default().load_record(meter_data(), &orphan),
            Err(DomainError::InvalidColumn { .. })
        ));
    }

    #[test]
    fn test_only_latest_table_fetch_is_current() {
        let mut s = Session::default();
        let first = s.begin_table_fetch();
        let second = s.begin_table_fetch();
        assert!(!s.is_latest_table_fetch(first));
        assert!(s.is_latest_table_fetch(second));
    }

    #[test]
    fn test_pending_guard_flags() {
        let mut s = Session::default();
        s.begin(Operation::Validation).unwrap();
        assert_eq!(
            s.begin(Operation::Validation),
            Err(DomainError::OperationPending(Operation::Validation))
        );
        assert!(s.begin(Operation::Conversion).is_ok());
        s.finish(Operation::Validation);
        assert!(!s.is_pending(Operation::Validation));
        assert!(s.is_pending(Operation::Conversion));
    }
}
