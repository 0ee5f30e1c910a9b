// rulecraft-core/src/infrastructure/adapters/memory_registry.rs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::domain::rule::{NewRule, RuleId, RuleRecord};
use crate::ports::{RuleRegistry, ServiceError};

#[derive(Debug, Default)]
struct RegistryState {
    rules: Vec<RuleRecord>,
    next_id: RuleId,
}

/// Process-local rule store. Ids are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryRuleRegistry {
    state: Mutex<RegistryState>,
}

impl Default for InMemoryRuleRegistry {
    fn default() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                rules: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryRuleRegistry {
    /// Starts from existing records. Ids must be unique and leave room for a next one.
    pub fn seeded(rules: Vec<RuleRecord>) -> Result<Self, ServiceError> {
        let mut seen = BTreeSet::new();
        if let Some(dup) = rules.iter().find(|r| !seen.insert(r.id)) {
            return Err(ServiceError::PersistFailed(format!(
                "duplicate rule id #{} in seed rules",
                dup.id
            )));
        }
        let next_id = match rules.iter().map(|r| r.id).max() {
            Some(max) => next_after(max)?,
            None => 1,
        };
        debug!(count = rules.len(), next_id, "Seeding rule registry");
        Ok(Self {
            state: Mutex::new(RegistryState { rules, next_id }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, ServiceError> {
        self.state
            .lock()
            .map_err(|_| ServiceError::PersistFailed("Registry Mutex Poisoned".into()))
    }
}

fn next_after(id: RuleId) -> Result<RuleId, ServiceError> {
    id.checked_add(1)
        .ok_or_else(|| ServiceError::PersistFailed(format!("no rule id left after #{}", id)))
}

fn not_found(id: RuleId) -> ServiceError {
    ServiceError::NotFound(format!("rule #{}", id))
}

#[async_trait]
impl RuleRegistry for InMemoryRuleRegistry {
    async fn create(&self, rule: NewRule) -> Result<RuleRecord, ServiceError> {
        rule.check()
            .map_err(|e| ServiceError::PersistFailed(e.to_string()))?;
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id = next_after(id)?;
        let record = RuleRecord::from_new(id, rule, Utc::now());
        state.rules.push(record.clone());
        info!(rule.id = id, "Rule stored");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<RuleRecord>, ServiceError> {
        Ok(self.lock()?.rules.clone())
    }

    async fn get(&self, id: RuleId) -> Result<RuleRecord, ServiceError> {
        self.lock()?
            .rules
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the payload and keeps the original creation date.
    async fn update(&self, id: RuleId, rule: NewRule) -> Result<RuleRecord, ServiceError> {
        rule.check()
            .map_err(|e| ServiceError::PersistFailed(e.to_string()))?;
        let mut state = self.lock()?;
        let slot = state
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        let created_at = slot.created_at;
        *slot = RuleRecord::from_new(id, rule, Utc::now());
        slot.created_at = created_at.or(slot.created_at);
        Ok(slot.clone())
    }

    async fn delete(&self, id: RuleId) -> Result<(), ServiceError> {
        let mut state = self.lock()?;
        let before = state.rules.len();
        state.rules.retain(|r| r.id != id);
        if state.rules.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
