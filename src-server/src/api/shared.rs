use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Requested year, defaulting to the current one
pub fn resolve_year(year: Option<i32>) -> ApiResult<i32> {
    match year {
        Some(year) if !(1900..=9998).contains(&year) => {
            Err(ApiError::BadRequest(format!("Year {} is out of range", year)))
        }
        Some(year) => Ok(year),
        None => Ok(today().year()),
    }
}

/// Split a comma separated `subjects` parameter, dropping blanks
pub fn parse_subject_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
