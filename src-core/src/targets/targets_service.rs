use crate::errors::{Error, Result, ValidationError};
use crate::periods::{year_prefix, MonthKey, MonthSeries};
use crate::targets::targets_model::{NewTarget, Target, TargetUpdate};
use crate::targets::targets_traits::{TargetRepositoryTrait, TargetServiceTrait};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

pub struct TargetService<T: TargetRepositoryTrait> {
    target_repo: Arc<T>,
}

impl<T: TargetRepositoryTrait> TargetService<T> {
    pub fn new(target_repo: Arc<T>) -> Self {
        TargetService { target_repo }
    }

    /// Reject a target that would give `subject_id` a second entry for
    /// `month_key`. The target being edited is skipped.
    pub async fn validate_target_conflicts(
        &self,
        subject_id: &str,
        month_key: &MonthKey,
        exclude_target_id: Option<&str>,
    ) -> Result<()> {
        let existing = self
            .target_repo
            .fetch_targets(subject_id, &year_prefix(month_key.year()))
            .await?;

        let month = month_key.to_string();
        for target in existing {
            if target.subject_id != subject_id || target.month_key != month {
                continue;
            }
            if let Some(exclude_id) = exclude_target_id {
                if target.id == exclude_id {
                    continue;
                }
            }
            return Err(Error::Validation(ValidationError::DuplicateTarget {
                subject_id: subject_id.to_string(),
                month_key: month,
            }));
        }

        Ok(())
    }
}

/// Validate the user-supplied parts of a target and return its parsed month.
fn validate_target_fields(subject_id: &str, month_key: &str, amount: f64) -> Result<MonthKey> {
    if subject_id.trim().is_empty() {
        return Err(ValidationError::InvalidInput("Target must have a subject_id".to_string()).into());
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::InvalidAmount(amount).into());
    }
    Ok(month_key.parse::<MonthKey>()?)
}

/// Place `targets` into a zero-filled series for `year`.
///
/// Rows with an unreadable month key or from another year are skipped. If a
/// subject somehow has two rows for one month the later row wins.
pub fn build_target_series(year: i32, targets: &[Target]) -> MonthSeries {
    let mut series = MonthSeries::zeroed(year);
    let mut seen = [false; 12];

    for target in targets {
        let key = match target.month_key.parse::<MonthKey>() {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping target {}: {}", target.id, e);
                continue;
            }
        };
        if key.year() != year {
            debug!(
                "Skipping target {} for {} outside requested year {}",
                target.id, key, year
            );
            continue;
        }
        if seen[key.index()] {
            warn!(
                "Subject {} has more than one target for {}, using {}",
                target.subject_id, key, target.id
            );
        }
        seen[key.index()] = true;
        series.set(&key, target.amount.max(0.0));
    }

    series
}

#[async_trait]
impl<T: TargetRepositoryTrait> TargetServiceTrait for TargetService<T> {
    async fn get_targets(&self, subject_id: &str, year: i32) -> Result<Vec<Target>> {
        let mut targets = self
            .target_repo
            .fetch_targets(subject_id, &year_prefix(year))
            .await?;
        targets.sort_by(|a, b| a.month_key.cmp(&b.month_key));
        Ok(targets)
    }

    async fn load_target_series(&self, subject_id: &str, year: i32) -> Result<MonthSeries> {
        let targets = self
            .target_repo
            .fetch_targets(subject_id, &year_prefix(year))
            .await?;
        debug!(
            "Loaded {} target rows for subject {} in {}",
            targets.len(),
            subject_id,
            year
        );
        Ok(build_target_series(year, &targets))
    }

    async fn create_target(&self, new_target: NewTarget) -> Result<Target> {
        let month_key =
            validate_target_fields(&new_target.subject_id, &new_target.month_key, new_target.amount)?;
        self.validate_target_conflicts(&new_target.subject_id, &month_key, None)
            .await?;

        let normalized = NewTarget {
            month_key: month_key.to_string(),
            ..new_target
        };
        let target = Target::from_new(uuid::Uuid::new_v4().to_string(), normalized);
        self.target_repo.insert_target(target).await
    }

    async fn update_target(&self, target: TargetUpdate) -> Result<Target> {
        let month_key = validate_target_fields(&target.subject_id, &target.month_key, target.amount)?;

        if self.target_repo.get_target(&target.id).await?.is_none() {
            return Err(Error::NotFound(format!("Target '{}' not found", target.id)));
        }
        self.validate_target_conflicts(&target.subject_id, &month_key, Some(target.id.as_str()))
            .await?;

        self.target_repo
            .update_target(TargetUpdate {
                month_key: month_key.to_string(),
                ..target
            })
            .await
    }

    async fn delete_target(&self, target_id: &str) -> Result<usize> {
        let deleted = self.target_repo.delete_target(target_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Target '{}' not found", target_id)));
        }
        Ok(deleted)
    }
}
