use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fulfilment state of an order, as far as achievement is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusClass {
    Completed,
    Pending,
    Cancelled,
    Unknown,
}

impl StatusClass {
    pub fn is_achieved(&self) -> bool {
        matches!(self, StatusClass::Completed)
    }
}

lazy_static! {
    /// Every status string the order screens are known to write, normalized.
    static ref STATUS_TABLE: HashMap<&'static str, StatusClass> = {
        use StatusClass::*;
        let entries: [(&str, StatusClass); 40] = [
            // completed
            ("complete", Completed),
            ("completed", Completed),
            ("order completed", Completed),
            ("deliver", Completed),
            ("delivered", Completed),
            ("order delivered", Completed),
            ("confirm", Completed),
            ("confirmed", Completed),
            ("order confirmed", Completed),
            ("payment confirmed", Completed),
            ("order complete", Completed),
            ("completed successfully", Completed),
            ("payment complete", Completed),
            ("payment completed", Completed),
            ("delivery confirmed", Completed),
            ("delivery complete", Completed),
            ("delivery completed", Completed),
            ("delivered successfully", Completed),
            ("confirmed delivery", Completed),
            // pending
            ("pending", Pending),
            ("new", Pending),
            ("placed", Pending),
            ("open", Pending),
            ("processing", Pending),
            ("in progress", Pending),
            ("in production", Pending),
            ("ready", Pending),
            ("dispatched", Pending),
            ("shipped", Pending),
            ("in transit", Pending),
            ("on hold", Pending),
            ("awaiting approval", Pending),
            ("approval pending", Pending),
            // cancelled
            ("cancelled", Cancelled),
            ("canceled", Cancelled),
            ("cancel", Cancelled),
            ("rejected", Cancelled),
            ("returned", Cancelled),
            ("refunded", Cancelled),
            ("failed", Cancelled),
        ];
        entries.into_iter().collect()
    };
}

/// Lowercase, treat `_` and `-` as spaces, collapse runs of whitespace.
pub fn normalize_status(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look a raw status string up in the status table. Anything not listed,
/// including an empty or missing status, is `Unknown`.
pub fn classify_status(raw: Option<&str>) -> StatusClass {
    let Some(raw) = raw else {
        return StatusClass::Unknown;
    };
    STATUS_TABLE
        .get(normalize_status(raw).as_str())
        .copied()
        .unwrap_or(StatusClass::Unknown)
}
