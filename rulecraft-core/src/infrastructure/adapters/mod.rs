// rulecraft-core/src/infrastructure/adapters/mod.rs

// Deterministic reference implementations of every port.

pub mod fixture_tables;
pub mod memory_registry;
pub mod sample_validator;
pub mod suggestion_catalog;
pub mod template_sql;
pub mod tracing_notifier;

pub use fixture_tables::FixtureTableProvider;
pub use memory_registry::InMemoryRuleRegistry;
pub use sample_validator::SampleValidationExecutor;
pub use suggestion_catalog::CatalogSuggestionProvider;
pub use template_sql::TemplateSqlConverter;
pub use tracing_notifier::TracingNotifier;
