use log::{debug, warn};

use crate::achievement::achievement_model::AchievementSeries;
use crate::transactions::classifier::{classify_detailed, Rejection};
use crate::transactions::transactions_model::TransactionRecord;

/// Sum the achieved quantity of `records` into the months of `year`.
///
/// A bad record is counted and skipped; it never voids the rest of the batch.
pub fn aggregate_achievement(records: &[TransactionRecord], year: i32) -> AchievementSeries {
    let mut series = AchievementSeries::empty(year);

    for record in records {
        let detailed = classify_detailed(record);
        let record_id = record.id.as_deref().unwrap_or("<no id>");

        match detailed.rejection {
            Some(Rejection::NotCompleted(_)) => {
                series.not_completed += 1;
                continue;
            }
            Some(Rejection::MissingDate) => {
                warn!("Order {} is completed but has no created_at, skipping", record_id);
                series.malformed += 1;
                continue;
            }
            Some(Rejection::UnparseableDate(raw)) => {
                warn!("Order {} has unreadable created_at '{}', skipping", record_id, raw);
                series.malformed += 1;
                continue;
            }
            None => {}
        }

        let classification = detailed.classification;
        let Some(month_key) = classification.month_key else {
            continue;
        };
        if !series.achieved.add(&month_key, classification.quantity) {
            debug!("Order {} dated {} falls outside {}", record_id, month_key, year);
            series.out_of_year += 1;
            continue;
        }
        series.completed_counts[month_key.index()] += 1;

        if detailed.quantity_field.is_none() {
            debug!("Order {} is completed but carries no quantity", record_id);
        }
    }

    series
}
