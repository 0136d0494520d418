use serde::{Deserialize, Serialize};

use crate::periods::{MonthSeries, MONTHS_PER_YEAR};

/// Achieved quantity per month for one year, with the record counts behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementSeries {
    pub achieved: MonthSeries,
    /// Completed records per month, including ones that carried no quantity
    pub completed_counts: [u32; MONTHS_PER_YEAR],
    /// Completed records dated in another year
    pub out_of_year: u32,
    /// Records excluded for a missing or unreadable date
    pub malformed: u32,
    /// Records whose status did not count as completed
    pub not_completed: u32,
}

impl AchievementSeries {
    pub fn empty(year: i32) -> Self {
        AchievementSeries {
            achieved: MonthSeries::zeroed(year),
            completed_counts: [0; MONTHS_PER_YEAR],
            out_of_year: 0,
            malformed: 0,
            not_completed: 0,
        }
    }

    pub fn year(&self) -> i32 {
        self.achieved.year
    }

    pub fn total_completed(&self) -> u32 {
        self.completed_counts.iter().sum()
    }
}
