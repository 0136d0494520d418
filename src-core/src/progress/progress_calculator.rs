use crate::periods::{month_keys, MonthSeries, MONTHS_PER_YEAR};
use crate::progress::progress_model::{CurrentMonthProgress, ProgressSummary, YearTotals};

/// `achieved / target * 100`, rounded. A zero or missing target yields 0.
pub fn percentage_of(achieved: f64, target: f64) -> f64 {
    exact_percentage_of(achieved, target).round()
}

/// `achieved / target * 100` without rounding. A zero or missing target
/// yields 0. Used for year totals.
pub fn exact_percentage_of(achieved: f64, target: f64) -> f64 {
    if target > 0.0 {
        achieved / target * 100.0
    } else {
        0.0
    }
}

/// Combine index-aligned target and achieved series.
///
/// `current_month_index` is 0-based; out of range values are clamped to
/// December.
pub fn calculate_progress(
    targets: &MonthSeries,
    achieved: &MonthSeries,
    current_month_index: usize,
) -> ProgressSummary {
    let monthly_percentages: [f64; MONTHS_PER_YEAR] =
        std::array::from_fn(|i| percentage_of(achieved.values[i], targets.values[i]));

    let total_target = targets.total();
    let total_achieved = achieved.total();

    let current = current_month_index.min(MONTHS_PER_YEAR - 1);
    let current_target = targets.values[current];
    let current_achieved = achieved.values[current];

    ProgressSummary {
        monthly_percentages,
        year_totals: YearTotals {
            target: total_target,
            achieved: total_achieved,
            percentage: exact_percentage_of(total_achieved, total_target),
        },
        current_month: CurrentMonthProgress {
            month_key: month_keys(targets.year)[current],
            target: current_target,
            achieved: current_achieved,
            percentage: monthly_percentages[current],
            remaining: (current_target - current_achieved).max(0.0),
            is_achieved: current_target > 0.0 && current_achieved >= current_target,
        },
    }
}
