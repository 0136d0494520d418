use serde::{Deserialize, Serialize};

use super::month_key::{month_keys, MonthKey, MONTHS_PER_YEAR};

/// Twelve values, one per calendar month of `year`, January first.
/// Missing months are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSeries {
    pub year: i32,
    pub values: [f64; MONTHS_PER_YEAR],
}

impl MonthSeries {
    pub fn zeroed(year: i32) -> Self {
        MonthSeries {
            year,
            values: [0.0; MONTHS_PER_YEAR],
        }
    }

    pub fn from_values(year: i32, values: [f64; MONTHS_PER_YEAR]) -> Self {
        MonthSeries { year, values }
    }

    pub fn months(&self) -> [MonthKey; MONTHS_PER_YEAR] {
        month_keys(self.year)
    }

    pub fn get(&self, key: &MonthKey) -> Option<f64> {
        (key.year() == self.year).then(|| self.values[key.index()])
    }

    /// Overwrite the value for `key`. Returns false when the key belongs to
    /// another year.
    pub fn set(&mut self, key: &MonthKey, value: f64) -> bool {
        if key.year() != self.year {
            return false;
        }
        self.values[key.index()] = value;
        true
    }

    /// Add to the value for `key`. Returns false when the key belongs to
    /// another year.
    pub fn add(&mut self, key: &MonthKey, value: f64) -> bool {
        if key.year() != self.year {
            return false;
        }
        self.values[key.index()] += value;
        true
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Element-wise sum, used for team roll-ups. Both series must cover the
    /// same year.
    pub fn accumulate(&mut self, other: &MonthSeries) {
        debug_assert_eq!(self.year, other.year);
        for (acc, value) in self.values.iter_mut().zip(other.values.iter()) {
            *acc += value;
        }
    }
}
