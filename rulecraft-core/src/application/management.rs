// rulecraft-core/src/application/management.rs
//
// USE CASE: browse, filter, edit and delete stored rules.

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

use super::authoring::RuleAuthoringWorkflow;
use crate::domain::rule::{RuleFilter, RuleId, RuleRecord};
use crate::error::RuleCraftError;
use crate::ports::{Notice, Notifier, RuleRegistry};

/// Values offered in the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub tables: Vec<String>,
    pub columns: Vec<String>,
}

pub struct RuleManagement {
    registry: Arc<dyn RuleRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl RuleManagement {
    pub fn new(registry: Arc<dyn RuleRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }

    #[instrument(skip(self))]
    pub async fn list_rules(&self, filter: &RuleFilter) -> Result<Vec<RuleRecord>, RuleCraftError> {
        let rules = self.all_rules().await?;
        Ok(filter.apply(&rules))
    }

    /// Removes one rule. An unknown id leaves the registry untouched.
    #[instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), RuleCraftError> {
        if let Err(e) = self.registry.delete(id).await {
            self.notifier
                .notify(Notice::error("Delete Failed", e.to_string()));
            return Err(e.into());
        }
        info!(rule.id = id, "Rule deleted");
        self.notifier.notify(Notice::success(
            "Rule Deleted",
            format!("Rule #{} has been removed", id),
        ));
        Ok(())
    }

    /// Loads a stored rule into the authoring workflow.
    #[instrument(skip(self, workflow))]
    pub async fn edit_rule(
        &self,
        id: RuleId,
        workflow: &RuleAuthoringWorkflow,
    ) -> Result<RuleRecord, RuleCraftError> {
        let record = match self.registry.get(id).await {
            Ok(record) => record,
            Err(e) => {
                self.notifier
                    .notify(Notice::error("Rule Not Found", e.to_string()));
                return Err(e.into());
            }
        };
        workflow.load_for_edit(&record).await?;
        Ok(record)
    }

    /// Stores previously exported rules as new records. They get fresh ids;
    /// the first failure stops the import and keeps what was already stored.
    #[instrument(skip(self, rules), fields(count = rules.len()))]
    pub async fn import(&self, rules: Vec<RuleRecord>) -> Result<Vec<RuleRecord>, RuleCraftError> {
        let mut stored = Vec::with_capacity(rules.len());
        for rule in &rules {
            match self.registry.create(rule.to_new_rule()).await {
                Ok(record) => stored.push(record),
                Err(e) => {
                    self.notifier.notify(Notice::error(
                        "Import Failed",
                        format!("\"{}\": {}", rule.name, e),
                    ));
                    return Err(e.into());
                }
            }
        }
        info!(count = stored.len(), "Rules imported");
        self.notifier.notify(Notice::success(
            "Rules Imported",
            format!("{} rule(s) added to the registry", stored.len()),
        ));
        Ok(stored)
    }

    /// Distinct tables and columns present in the registry, sorted.
    pub async fn filter_options(&self) -> Result<FilterOptions, RuleCraftError> {
        let rules = self.all_rules().await?;
        let tables: BTreeSet<_> = rules.iter().map(|r| r.table_name.clone()).collect();
        let columns: BTreeSet<_> = rules.iter().map(|r| r.column_name.clone()).collect();
        Ok(FilterOptions {
            tables: tables.into_iter().collect(),
            columns: columns.into_iter().collect(),
        })
    }

    async fn all_rules(&self) -> Result<Vec<RuleRecord>, RuleCraftError> {
        self.registry.list().await.map_err(|e| {
            self.notifier
                .notify(Notice::error("Loading Rules Failed", e.to_string()));
            e.into()
        })
    }

    /// "Add new rule": pre-positions the workflow on the filtered table/column.
    pub async fn start_new_rule(
        &self,
        filter: &RuleFilter,
        workflow: &RuleAuthoringWorkflow,
    ) -> Result<(), RuleCraftError> {
        let Some(table) = filter.table.as_deref() else {
            workflow.reset_draft()?;
            return Ok(());
        };
        workflow.select_table(table).await?;
        if let Some(column) = filter.column.as_deref() {
            workflow.select_column(column)?;
        }
        Ok(())
    }
}
