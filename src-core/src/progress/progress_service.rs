use crate::achievement::{aggregate_achievement, AchievementSeries};
use crate::errors::{Error, Result, ValidationError};
use crate::periods::{month_keys, year_bounds, year_prefix, MonthSeries, MONTHS_PER_YEAR};
use crate::progress::progress_calculator::calculate_progress;
use crate::progress::progress_model::{MemberProgress, TeamProgress, YearProgress};
use crate::targets::{build_target_series, TargetRepositoryTrait};
use crate::transactions::TransactionRepositoryTrait;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;
use log::{debug, info};
use std::sync::Arc;

#[async_trait]
pub trait ProgressServiceTrait: Send + Sync {
    /// Target against achievement for `subject_id` over `year`. `today`
    /// selects the current month.
    async fn compute_year_progress(
        &self,
        subject_id: &str,
        year: i32,
        today: NaiveDate,
    ) -> Result<YearProgress>;

    /// Roll several subjects up into one view.
    async fn compute_team_progress(
        &self,
        subject_ids: &[String],
        year: i32,
        today: NaiveDate,
    ) -> Result<TeamProgress>;
}

pub struct ProgressService<T: TargetRepositoryTrait, R: TransactionRepositoryTrait> {
    target_repo: Arc<T>,
    transaction_repo: Arc<R>,
}

impl<T: TargetRepositoryTrait, R: TransactionRepositoryTrait> ProgressService<T, R> {
    pub fn new(target_repo: Arc<T>, transaction_repo: Arc<R>) -> Self {
        ProgressService {
            target_repo,
            transaction_repo,
        }
    }

    /// Fetch targets and orders concurrently; both must succeed before any
    /// aggregation happens.
    pub async fn load_subject_series(
        &self,
        subject_id: &str,
        year: i32,
    ) -> Result<(MonthSeries, AchievementSeries)> {
        let (start, end) = year_bounds(year).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Year {} is out of range",
                year
            )))
        })?;
        let prefix = year_prefix(year);

        let (targets, records) = futures::try_join!(
            self.target_repo.fetch_targets(subject_id, &prefix),
            self.transaction_repo
                .fetch_transactions(subject_id, start, end),
        )?;
        debug!(
            "Subject {} {}: {} target rows, {} order rows",
            subject_id,
            year,
            targets.len(),
            records.len()
        );

        let target_series = build_target_series(year, &targets);
        let achievement = aggregate_achievement(&records, year);
        if achievement.malformed > 0 {
            info!(
                "Subject {} {}: {} malformed order rows excluded",
                subject_id, year, achievement.malformed
            );
        }

        Ok((target_series, achievement))
    }
}

/// Assemble the dashboard payload from already loaded series.
pub fn build_year_progress(
    subject_id: Option<String>,
    targets: &MonthSeries,
    achievement: &AchievementSeries,
    today: NaiveDate,
) -> YearProgress {
    let summary = calculate_progress(targets, &achievement.achieved, today.month0() as usize);

    YearProgress {
        subject_id,
        year: targets.year,
        months: month_keys(targets.year),
        targets: targets.values,
        achieved: achievement.achieved.values,
        completed_orders: achievement.completed_counts,
        monthly_percentages: summary.monthly_percentages,
        year_totals: summary.year_totals,
        current_month: summary.current_month,
    }
}

#[async_trait]
impl<T: TargetRepositoryTrait, R: TransactionRepositoryTrait> ProgressServiceTrait
    for ProgressService<T, R>
{
    async fn compute_year_progress(
        &self,
        subject_id: &str,
        year: i32,
        today: NaiveDate,
    ) -> Result<YearProgress> {
        if subject_id.trim().is_empty() {
            return Err(ValidationError::InvalidInput("subject_id is required".to_string()).into());
        }
        let (targets, achievement) = self.load_subject_series(subject_id, year).await?;
        Ok(build_year_progress(
            Some(subject_id.to_string()),
            &targets,
            &achievement,
            today,
        ))
    }

    async fn compute_team_progress(
        &self,
        subject_ids: &[String],
        year: i32,
        today: NaiveDate,
    ) -> Result<TeamProgress> {
        if subject_ids.is_empty() || subject_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ValidationError::InvalidInput(
                "Team progress needs at least one non-empty subject id".to_string(),
            )
            .into());
        }

        let loaded = try_join_all(
            subject_ids
                .iter()
                .map(|subject_id| self.load_subject_series(subject_id, year)),
        )
        .await?;

        let mut combined_targets = MonthSeries::zeroed(year);
        let mut combined_achievement = AchievementSeries::empty(year);
        let mut members = Vec::with_capacity(loaded.len());

        for (subject_id, (targets, achievement)) in subject_ids.iter().zip(loaded.iter()) {
            combined_targets.accumulate(targets);
            combined_achievement.achieved.accumulate(&achievement.achieved);
            for i in 0..MONTHS_PER_YEAR {
                combined_achievement.completed_counts[i] += achievement.completed_counts[i];
            }

            let progress = build_year_progress(None, targets, achievement, today);
            members.push(MemberProgress {
                subject_id: subject_id.clone(),
                year_totals: progress.year_totals,
                current_month: progress.current_month,
            });
        }

        Ok(TeamProgress {
            year,
            combined: build_year_progress(None, &combined_targets, &combined_achievement, today),
            members,
        })
    }
}
