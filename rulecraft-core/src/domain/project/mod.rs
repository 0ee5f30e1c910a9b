pub mod configuration;

pub use configuration::{ProjectConfig, ValidationConfig, WorkflowConfig};
