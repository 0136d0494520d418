use serde::{Deserialize, Serialize};

use crate::periods::{MonthKey, MONTHS_PER_YEAR};

/// Target totals against achievement for a whole year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotals {
    pub target: f64,
    pub achieved: f64,
    /// Rounded; 0 when no target was assigned
    pub percentage: f64,
}

/// Progress for the month the viewer is in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthProgress {
    pub month_key: MonthKey,
    pub target: f64,
    pub achieved: f64,
    pub percentage: f64,
    /// What is left to reach the target, never negative
    pub remaining: f64,
    /// Only true when a non-zero target was met
    pub is_achieved: bool,
}

/// Output of the progress calculation over a target and an achieved series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub monthly_percentages: [f64; MONTHS_PER_YEAR],
    pub year_totals: YearTotals,
    pub current_month: CurrentMonthProgress,
}

/// Everything a dashboard needs to draw one subject's year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub year: i32,
    pub months: [MonthKey; MONTHS_PER_YEAR],
    pub targets: [f64; MONTHS_PER_YEAR],
    pub achieved: [f64; MONTHS_PER_YEAR],
    pub completed_orders: [u32; MONTHS_PER_YEAR],
    pub monthly_percentages: [f64; MONTHS_PER_YEAR],
    pub year_totals: YearTotals,
    pub current_month: CurrentMonthProgress,
}

/// One subject's line in a team roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgress {
    pub subject_id: String,
    pub year_totals: YearTotals,
    pub current_month: CurrentMonthProgress,
}

/// Owner/manager view over several subjects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProgress {
    pub year: i32,
    /// Element-wise sum of every member's series
    pub combined: YearProgress,
    pub members: Vec<MemberProgress>,
}
