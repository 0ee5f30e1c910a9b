// rulecraft-core/src/domain/workflow/mod.rs

pub mod draft;
pub mod session;
pub mod state;

pub use draft::RuleDraft;
pub use session::{DraftContext, Session, SessionSnapshot, Submission};
pub use state::{Operation, WorkflowState};
