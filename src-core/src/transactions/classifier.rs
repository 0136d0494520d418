use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::periods::MonthKey;
use crate::transactions::status::{classify_status, StatusClass};
use crate::transactions::transactions_model::{QuantityField, TransactionRecord};

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_achieved: bool,
    pub month_key: Option<MonthKey>,
    pub quantity: f64,
}

impl Classification {
    fn excluded() -> Self {
        Classification {
            is_achieved: false,
            month_key: None,
            quantity: 0.0,
        }
    }
}

/// Why a record contributes nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotCompleted(StatusClass),
    MissingDate,
    UnparseableDate(String),
}

/// Classification plus the reason a record was excluded and the column its
/// quantity came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedClassification {
    pub classification: Classification,
    pub rejection: Option<Rejection>,
    pub quantity_field: Option<QuantityField>,
}

/// Classify one record as `(is_achieved, month_key, quantity)`.
pub fn classify(record: &TransactionRecord) -> Classification {
    classify_detailed(record).classification
}

pub fn classify_detailed(record: &TransactionRecord) -> DetailedClassification {
    let rejected = |rejection: Rejection| DetailedClassification {
        classification: Classification::excluded(),
        rejection: Some(rejection),
        quantity_field: None,
    };

    let status = classify_status(record.status.as_deref());
    if !status.is_achieved() {
        return rejected(Rejection::NotCompleted(status));
    }

    let raw_date = match record.created_at.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return rejected(Rejection::MissingDate),
    };
    let Some(date) = parse_record_date(raw_date) else {
        return rejected(Rejection::UnparseableDate(raw_date.to_string()));
    };

    let (quantity_field, quantity) = extract_quantity(record)
        .map(|(field, quantity)| (Some(field), quantity))
        .unwrap_or((None, 0.0));

    DetailedClassification {
        classification: Classification {
            is_achieved: true,
            month_key: Some(MonthKey::from_date(date)),
            quantity,
        },
        rejection: None,
        quantity_field,
    }
}

/// First quantity column, in priority order, holding a positive number.
///
/// Later columns are never added on top: the same physical quantity is often
/// recorded under several aliases.
pub fn extract_quantity(record: &TransactionRecord) -> Option<(QuantityField, f64)> {
    QuantityField::PRIORITY.iter().find_map(|field| {
        field
            .read(record)
            .and_then(|value| value.as_positive())
            .map(|quantity| (*field, quantity))
    })
}

/// Calendar date of a stored timestamp, as written (offsets are not
/// converted to UTC).
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // Postgres text output uses a space and a short offset, e.g. `+00`
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.date_naive());
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
