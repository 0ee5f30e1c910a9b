// rulecraft-core/src/application/mod.rs

pub mod assistant;
pub mod authoring;
pub mod management;
pub mod workbench;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement :
// `use rulecraft_core::application::{Workbench, RuleAuthoringWorkflow};`

pub use assistant::AssistantSession;
pub use authoring::{RuleAuthoringWorkflow, WorkflowServices, WorkflowSettings};
pub use management::{FilterOptions, RuleManagement};
pub use workbench::Workbench;
