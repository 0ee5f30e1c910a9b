// rulecraft-core/src/application/assistant.rs
//
// USE CASE: the rule assistant side panel. A running conversation that answers
// with suggestions for whatever column the workflow currently points at.

use chrono::Utc;
use tracing::debug;

use super::authoring::RuleAuthoringWorkflow;
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::error::DomainError;
use crate::error::RuleCraftError;

const GREETING: &str = "Hello! I'm here to help you create data quality rules.";

pub struct AssistantSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl AssistantSession {
    /// Opens the conversation with a greeting adapted to the current selection.
    pub fn open(selected_column: Option<&str>) -> Self {
        let follow_up = match selected_column {
            Some(column) => format!(
                "I see you've selected the \"{}\" column. What would you like to validate about this column?",
                column
            ),
            None => "Select a column to get started with rule suggestions.".to_string(),
        };
        Self {
            messages: vec![ChatMessage::assistant(1, format!("{} {}", GREETING, follow_up))],
            next_id: 2,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends a user message. Blank input is ignored and yields `None`.
    pub async fn send(
        &mut self,
        input: &str,
        workflow: &RuleAuthoringWorkflow,
    ) -> Result<Option<ChatMessage>, RuleCraftError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let id = self.allocate_id();
        self.messages.push(ChatMessage::user(id, input));

        let reply = match workflow.snapshot()?.column {
            None => ChatMessage::assistant(
                self.allocate_id(),
                "Please select a column first so I can suggest rules for it.",
            ),
            Some(column) => match workflow.request_suggestions().await {
                Ok(Some(suggestions)) => ChatMessage::assistant(
                    self.allocate_id(),
                    format!("Here are some suggestions for the {} column:", column),
                )
                .with_suggestions(suggestions),
                Ok(None) => ChatMessage::assistant(
                    self.allocate_id(),
                    "The selection changed while I was thinking. Ask me again?",
                ),
                Err(RuleCraftError::Domain(DomainError::OperationPending(_))) => {
                    ChatMessage::assistant(
                        self.allocate_id(),
                        "I'm still working on your previous question.",
                    )
                }
                Err(e) => return Err(e),
            },
        };

        debug!(
            suggestions = reply.suggestions.len(),
            at = %Utc::now(),
            "Assistant replied"
        );
        self.messages.push(reply.clone());
        Ok(Some(reply))
    }

    /// Number of messages sent by the user so far.
    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .count()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
