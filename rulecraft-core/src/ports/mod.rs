// rulecraft-core/src/ports/mod.rs

// Contracts the workflow consumes. They say what is needed, not how it is done:
// the infrastructure layer plugs in adapters, tests plug in stubs.

pub mod error;
pub mod notifier;
pub mod registry;
pub mod services;
pub mod tables;

pub use error::ServiceError;
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use registry::RuleRegistry;
pub use services::{
    ConversionRequest, SqlConverter, SuggestionProvider, SuggestionRequest, ValidationExecutor,
    ValidationRequest,
};
pub use tables::TableDataProvider;
