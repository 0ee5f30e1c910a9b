// rulecraft-core/src/ports/registry.rs

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::rule::{NewRule, RuleId, RuleRecord};

#[async_trait]
pub trait RuleRegistry: Send + Sync {
    async fn create(&self, rule: NewRule) -> Result<RuleRecord, ServiceError>;

    async fn list(&self) -> Result<Vec<RuleRecord>, ServiceError>;

    async fn get(&self, id: RuleId) -> Result<RuleRecord, ServiceError>;

    async fn update(&self, id: RuleId, rule: NewRule) -> Result<RuleRecord, ServiceError>;

    async fn delete(&self, id: RuleId) -> Result<(), ServiceError>;
}
