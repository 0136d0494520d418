use async_trait::async_trait;

use crate::errors::Result;
use crate::periods::MonthSeries;
use crate::targets::targets_model::{NewTarget, Target, TargetUpdate};

/// Access to stored targets. Implemented by the external store clients.
#[async_trait]
pub trait TargetRepositoryTrait: Send + Sync {
    /// All targets of `subject_id` whose month key starts with `year_prefix`
    /// (e.g. `2024-`). An empty result is a legitimate "no targets" answer.
    async fn fetch_targets(&self, subject_id: &str, year_prefix: &str) -> Result<Vec<Target>>;
    async fn get_target(&self, target_id: &str) -> Result<Option<Target>>;
    async fn insert_target(&self, target: Target) -> Result<Target>;
    async fn update_target(&self, target: TargetUpdate) -> Result<Target>;
    async fn delete_target(&self, target_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait TargetServiceTrait: Send + Sync {
    async fn get_targets(&self, subject_id: &str, year: i32) -> Result<Vec<Target>>;
    async fn load_target_series(&self, subject_id: &str, year: i32) -> Result<MonthSeries>;
    async fn create_target(&self, new_target: NewTarget) -> Result<Target>;
    async fn update_target(&self, target: TargetUpdate) -> Result<Target>;
    async fn delete_target(&self, target_id: &str) -> Result<usize>;
}
