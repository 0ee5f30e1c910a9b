// rulecraft-core/src/application/workbench.rs
//
// Composition root: configuration -> adapters -> use cases.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use super::assistant::AssistantSession;
use super::authoring::{RuleAuthoringWorkflow, WorkflowServices, WorkflowSettings};
use super::management::RuleManagement;
use crate::domain::project::ProjectConfig;
use crate::error::RuleCraftError;
use crate::infrastructure::adapters::{
    CatalogSuggestionProvider, FixtureTableProvider, InMemoryRuleRegistry,
    SampleValidationExecutor, TemplateSqlConverter,
};
use crate::infrastructure::config::load_project_config;
use crate::infrastructure::fixtures;
use crate::ports::{Notifier, TableDataProvider};

pub struct Workbench {
    pub config: ProjectConfig,
    pub tables: Arc<dyn TableDataProvider>,
    pub workflow: RuleAuthoringWorkflow,
    pub management: RuleManagement,
}

impl Workbench {
    #[instrument(skip(notifier))]
    pub fn load(project_dir: &Path, notifier: Arc<dyn Notifier>) -> Result<Self, RuleCraftError> {
        let config = load_project_config(project_dir)?;
        Self::from_config(config, notifier)
    }

    /// Wires the reference adapters. Tables declared in the configuration
    /// override the built-in fixture of the same name; without configured
    /// rules the registry starts from the demo seed.
    pub fn from_config(
        config: ProjectConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, RuleCraftError> {
        let tables: Arc<dyn TableDataProvider> = Arc::new(
            FixtureTableProvider::new(
                std::iter::once(fixtures::meter_data()).chain(config.tables.iter().cloned()),
            )
            .describe(fixtures::METER_DATA, fixtures::METER_DATA_DESCRIPTION),
        );

        let seed = if config.rules.is_empty() {
            fixtures::seed_rules()
        } else {
            config.rules.clone()
        };
        let registry = Arc::new(InMemoryRuleRegistry::seeded(seed)?);

        let services = WorkflowServices {
            tables: tables.clone(),
            suggestions: Arc::new(CatalogSuggestionProvider::new(tables.clone())),
            converter: Arc::new(TemplateSqlConverter::new()?),
            validator: Arc::new(SampleValidationExecutor::new(
                tables.clone(),
                config.validation.pass_ratio,
            )),
            registry: registry.clone(),
        };
        let settings = WorkflowSettings {
            text_edit_clears_sql: config.workflow.text_edit_clears_sql,
        };
        info!(
            project = %config.name,
            pass_ratio = config.validation.pass_ratio,
            "Workbench ready"
        );

        Ok(Self {
            workflow: RuleAuthoringWorkflow::new(services, settings, notifier.clone()),
            management: RuleManagement::new(registry, notifier),
            tables,
            config,
        })
    }

    /// Opens an assistant conversation on the current selection.
    pub fn assistant(&self) -> Result<AssistantSession, RuleCraftError> {
        let column = self.workflow.snapshot()?.column;
        Ok(AssistantSession::open(column.as_deref()))
    }
}
