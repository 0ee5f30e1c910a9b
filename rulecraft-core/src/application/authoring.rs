// rulecraft-core/src/application/authoring.rs
//
// USE CASE: author a data quality rule.
// Table -> Column -> Rule text -> SQL -> Validation -> Registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::rule::{RuleCategory, RuleRecord, RuleSuggestion};
use crate::domain::validation::ValidationOutcome;
use crate::domain::workflow::{DraftContext, Operation, Session, SessionSnapshot, WorkflowState};
use crate::error::RuleCraftError;
use crate::ports::{
    ConversionRequest, Notice, NoticeLevel, Notifier, RuleRegistry, ServiceError, SqlConverter,
    SuggestionProvider, SuggestionRequest, TableDataProvider, ValidationExecutor,
    ValidationRequest,
};

/// The external services the workflow talks to.
#[derive(Clone)]
pub struct WorkflowServices {
    pub tables: Arc<dyn TableDataProvider>,
    pub suggestions: Arc<dyn SuggestionProvider>,
    pub converter: Arc<dyn SqlConverter>,
    pub validator: Arc<dyn ValidationExecutor>,
    pub registry: Arc<dyn RuleRegistry>,
}

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    /// Any text edit drops the generated SQL (otherwise only the outcome is dropped).
    pub text_edit_clears_sql: bool,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            text_edit_clears_sql: true,
        }
    }
}

/// Orchestrates one editing session.
///
/// Every method takes `&self`: the session sits behind a mutex that is only
/// locked in short synchronous sections, never across a service call. Each
/// asynchronous step allows a single request in flight and commits its result
/// only if the table, column and relevant draft field are unchanged; otherwise
/// the result is dropped and the call returns `Ok(None)`.
pub struct RuleAuthoringWorkflow {
    services: WorkflowServices,
    notifier: Arc<dyn Notifier>,
    session: Mutex<Session>,
}

/// Clears the in-flight flag of an operation, whatever way the call ends.
struct PendingGuard<'a> {
    session: &'a Mutex<Session>,
    op: Operation,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session.finish(self.op);
    }
}

impl RuleAuthoringWorkflow {
    pub fn new(
        services: WorkflowServices,
        settings: WorkflowSettings,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            services,
            notifier,
            session: Mutex::new(Session::new(settings.text_edit_clears_sql)),
        }
    }

    // --- LECTURE ---

    pub fn snapshot(&self) -> Result<SessionSnapshot, RuleCraftError> {
        Ok(self.lock()?.snapshot())
    }

    pub fn state(&self) -> Result<WorkflowState, RuleCraftError> {
        Ok(self.lock()?.state())
    }

    // --- SÉLECTION ---

    #[instrument(skip(self))]
    pub async fn select_table(&self, name: &str) -> Result<(), RuleCraftError> {
        let ticket = self.lock()?.begin_table_fetch();
        let table = match self.services.tables.fetch_table(name).await {
            Ok(table) => table,
            Err(e) => return self.report(e),
        };
        let columns = table.columns.len();
        {
            let mut session = self.lock()?;
            if !session.is_latest_table_fetch(ticket) {
                debug!(table = name, "A later selection superseded this table, dropping it");
                return Ok(());
            }
            session.select_table(table);
        }
        info!(table = name, columns, "Table selected");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn select_column(&self, name: &str) -> Result<(), RuleCraftError> {
        let selected = self.lock()?.select_column(name);
        selected.or_else(|e| self.report(e))?;
        self.notifier.notify(Notice::info(
            "Column Selected",
            format!("Now creating rules for the \"{}\" column", name),
        ));
        Ok(())
    }

    // --- BROUILLON ---

    pub fn edit_rule_text(&self, text: &str) -> Result<(), RuleCraftError> {
        let edited = self.lock()?.edit_text(text);
        edited.or_else(|e| self.report(e))
    }

    pub fn set_category(&self, category: RuleCategory) -> Result<(), RuleCraftError> {
        let changed = self.lock()?.set_category(category);
        changed.or_else(|e| self.report(e))
    }

    pub fn apply_suggestion(&self, suggestion: &RuleSuggestion) -> Result<(), RuleCraftError> {
        let applied = self.lock()?.apply_suggestion(suggestion);
        applied.or_else(|e| self.report(e))?;
        self.notifier
            .notify(Notice::info("Rule Suggestion Applied", suggestion.rule.clone()));
        Ok(())
    }

    pub fn reset_draft(&self) -> Result<(), RuleCraftError> {
        self.lock()?.reset_draft();
        Ok(())
    }

    /// Re-enters the workflow with an existing rule. A fresh validation is
    /// required before it can be resubmitted.
    #[instrument(skip(self, record), fields(rule.id = record.id))]
    pub async fn load_for_edit(&self, record: &RuleRecord) -> Result<(), RuleCraftError> {
        let ticket = self.lock()?.begin_table_fetch();
        let table = match self.services.tables.fetch_table(&record.table_name).await {
            Ok(table) => table,
            Err(e) => return self.report(e),
        };
        let loaded = {
            let mut session = self.lock()?;
            if !session.is_latest_table_fetch(ticket) {
                debug!("A later selection superseded this edit, dropping it");
                return Ok(());
            }
            session.load_record(table, record)
        };
        loaded.or_else(|e| self.report(e))?;
        self.notifier.notify(Notice::info(
            "Editing Rule",
            format!("Re-validate \"{}\" before submitting it again", record.name),
        ));
        Ok(())
    }

    // --- ÉTAPES ASYNCHRONES ---

    #[instrument(skip(self))]
    pub async fn request_suggestions(&self) -> Result<Option<Vec<RuleSuggestion>>, RuleCraftError> {
        let (ctx, _pending) = self
            .start(Operation::Suggestions, Session::suggestion_context)
            .or_else(|e| self.report(e))?;

        let request = SuggestionRequest {
            table_name: ctx.table.clone(),
            column_name: ctx.column.clone(),
            existing_rules: self.existing_rule_texts(&ctx).await,
        };
        let suggestions = match self.services.suggestions.suggest(&request).await {
            Ok(suggestions) => suggestions,
            Err(e) => return self.report(e),
        };

        if !self.lock()?.same_selection(&ctx) {
            debug!("Selection changed while fetching suggestions, dropping them");
            return Ok(None);
        }

        self.notifier.notify(Notice::info(
            "AI Suggestions",
            format!(
                "{} suggestions for the \"{}\" column",
                suggestions.len(),
                ctx.column
            ),
        ));
        Ok(Some(suggestions))
    }

    #[instrument(skip(self))]
    pub async fn convert_to_sql(&self) -> Result<Option<String>, RuleCraftError> {
        let (ctx, _pending) = self
            .start(Operation::Conversion, Session::conversion_context)
            .or_else(|e| self.report(e))?;

        let request = ConversionRequest {
            table_name: ctx.table.clone(),
            column_name: ctx.column.clone(),
            rule: ctx.draft.text.clone(),
        };
        let sql = match self.services.converter.convert(&request).await {
            Ok(sql) if !sql.trim().is_empty() => sql,
            Ok(_) => {
                return self.report(ServiceError::ConversionFailed(
                    "service returned an empty query".into(),
                ));
            }
            Err(e) => return self.report(e),
        };

        let committed = self.lock()?.commit_sql(&ctx, sql.clone());
        if !committed {
            debug!("Draft changed during conversion, dropping generated SQL");
            return Ok(None);
        }
        info!(sql = %sql, "Rule converted to SQL");
        Ok(Some(sql))
    }

    #[instrument(skip(self))]
    pub async fn validate(&self) -> Result<Option<ValidationOutcome>, RuleCraftError> {
        let (ctx, _pending) = self
            .start(Operation::Validation, Session::validation_context)
            .or_else(|e| self.report(e))?;

        let sql = ctx.draft.sql().unwrap_or_default().to_string();
        let request = ValidationRequest {
            sql_query: sql.clone(),
            table_name: ctx.table.clone(),
            column_name: ctx.column.clone(),
        };
        let report = match self.services.validator.validate(&request).await {
            Ok(report) => report,
            Err(e) => return self.report(e),
        };
        let outcome = match ValidationOutcome::from_report(report, &ctx.table, &ctx.column, &sql) {
            Ok(outcome) => outcome,
            Err(e) => return self.report(ServiceError::ValidationFailed(e.to_string())),
        };

        let committed = self.lock()?.commit_outcome(&ctx, outcome.clone());
        if !committed {
            debug!("Draft changed during validation, dropping outcome");
            return Ok(None);
        }

        let level = if outcome.percentage() >= 80.0 {
            NoticeLevel::Success
        } else {
            NoticeLevel::Warning
        };
        self.notifier.notify(Notice::new(
            level,
            "Validation Complete",
            format!(
                "{}% of rows pass the validation",
                outcome.display_percentage()
            ),
        ));
        info!(
            total = outcome.total_rows,
            passed = outcome.pass_count,
            "Validation finished"
        );
        Ok(Some(outcome))
    }

    /// Persists the validated draft (create, or update when editing).
    /// The draft is reset only if it is still the one that was submitted.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<RuleRecord, RuleCraftError> {
        let (submission, _pending) = self
            .start(Operation::Submission, Session::submission)
            .or_else(|e| self.report(e))?;

        let registry = &self.services.registry;
        let persisted = match submission.editing() {
            Some(id) => registry.update(id, submission.rule.clone()).await,
            None => registry.create(submission.rule.clone()).await,
        };
        let record = match persisted {
            Ok(record) => record,
            Err(e) => return self.report(e),
        };

        let reset = self.lock()?.complete_submission(&submission);
        if !reset {
            debug!("Draft changed during submission, keeping the new draft");
        }

        let title = if submission.editing().is_some() {
            "Rule Updated"
        } else {
            "Rule Submitted"
        };
        self.notifier.notify(Notice::success(
            title,
            format!(
                "Rule for \"{}\" has been saved successfully",
                record.column_name
            ),
        ));
        info!(rule.id = record.id, "Rule persisted");
        Ok(record)
    }

    // --- INTERNES ---

    fn lock(&self) -> Result<MutexGuard<'_, Session>, RuleCraftError> {
        self.session
            .lock()
            .map_err(|_| RuleCraftError::InternalError("Workflow session mutex poisoned".into()))
    }

    /// Checks preconditions and marks `op` in flight, atomically.
    fn start<T>(
        &self,
        op: Operation,
        prepare: impl FnOnce(&Session) -> Result<T, DomainError>,
    ) -> Result<(T, PendingGuard<'_>), RuleCraftError> {
        let mut session = self.lock()?;
        let prepared = prepare(&session)?;
        session.begin(op)?;
        Ok((
            prepared,
            PendingGuard {
                session: &self.session,
                op,
            },
        ))
    }

    async fn existing_rule_texts(&self, ctx: &DraftContext) -> Vec<String> {
        match self.services.registry.list().await {
            Ok(rules) => rules
                .into_iter()
                .filter(|r| r.table_name == ctx.table && r.column_name == ctx.column)
                .map(|r| r.name)
                .collect(),
            Err(e) => {
                warn!("Could not list existing rules: {}", e);
                Vec::new()
            }
        }
    }

    /// Surfaces an error to the user, then hands it back to the caller.
    fn report<T>(&self, err: impl Into<RuleCraftError>) -> Result<T, RuleCraftError> {
        let err = err.into();
        let level = match &err {
            RuleCraftError::Domain(DomainError::OperationPending(_)) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        warn!("{}", err);
        self.notifier
            .notify(Notice::new(level, notice_title(&err), err.to_string()));
        Err(err)
    }
}

fn notice_title(err: &RuleCraftError) -> &'static str {
    match err {
        RuleCraftError::Domain(e) => match e {
            DomainError::InvalidColumn { .. } => "Invalid Column",
            DomainError::MissingSelection("table") => "No Table Selected",
            DomainError::MissingSelection(_) => "No Column Selected",
            DomainError::IncompleteDraft(_) => "Incomplete Information",
            DomainError::NoSqlToValidate => "No SQL Query",
            DomainError::InvalidCategory(_) => "Invalid Category",
            DomainError::OperationPending(_) => "Please Wait",
            DomainError::InconsistentOutcome { .. } => "Validation Failed",
        },
        RuleCraftError::Service(e) => match e {
            ServiceError::NotFound(_) => "Not Found",
            ServiceError::ConversionFailed(_) => "Conversion Failed",
            ServiceError::ValidationFailed(_) => "Validation Failed",
            ServiceError::PersistFailed(_) => "Submit Failed",
            ServiceError::SuggestionsUnavailable(_) => "Suggestions Unavailable",
        },
        _ => "Error",
    }
}
