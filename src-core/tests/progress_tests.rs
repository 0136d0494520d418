//! Tests for order classification, monthly aggregation and year progress
//! These tests drive the engine end to end over the in-memory store

use chrono::NaiveDate;
use feedtrack_core::achievement::aggregate_achievement;
use feedtrack_core::periods::MonthSeries;
use feedtrack_core::progress::{calculate_progress, ProgressService, ProgressServiceTrait};
use feedtrack_core::store::InMemoryStore;
use feedtrack_core::targets::Target;
use feedtrack_core::transactions::{classify, QuantityValue, TransactionRecord};
use feedtrack_core::Error;
use std::sync::Arc;

fn order(subject_id: &str, status: &str, created_at: &str) -> TransactionRecord {
    TransactionRecord {
        id: Some(format!("{}-{}-{}", subject_id, status, created_at)),
        subject_id: Some(subject_id.to_string()),
        status: Some(status.to_string()),
        created_at: Some(created_at.to_string()),
        ..Default::default()
    }
}

fn target(subject_id: &str, month_key: &str, amount: f64) -> Target {
    Target {
        id: format!("{}-{}", subject_id, month_key),
        subject_id: subject_id.to_string(),
        month_key: month_key.to_string(),
        amount,
        created_at: None,
        updated_at: None,
    }
}

fn june_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_delivered_order_counts_its_bags() {
        let record = TransactionRecord {
            bags: Some(QuantityValue::Number(10.0)),
            tons: None,
            ..order("emp-1", "Delivered", "2024-03-15")
        };

        let result = classify(&record);

        assert!(result.is_achieved);
        assert_eq!(result.month_key.map(|k| k.to_string()).as_deref(), Some("2024-03"));
        assert_eq!(result.quantity, 10.0);
    }

    #[test]
    fn test_pending_order_is_excluded() {
        let record = TransactionRecord {
            bags: Some(QuantityValue::Number(10.0)),
            ..order("emp-1", "pending", "2024-03-15")
        };

        let result = classify(&record);

        assert!(!result.is_achieved);
        assert_eq!(result.month_key, None);
        assert_eq!(result.quantity, 0.0);
    }

    #[test]
    fn test_tons_take_priority_over_bags() {
        let record = TransactionRecord {
            tons: Some(QuantityValue::Number(5.0)),
            bags: Some(QuantityValue::Number(200.0)),
            ..order("emp-1", "completed", "2024-06-01")
        };

        let result = classify(&record);

        assert!(result.is_achieved);
        assert_eq!(result.quantity, 5.0, "first positive field wins, fields are not summed");
    }

    #[test]
    fn test_zero_and_text_fields_fall_through() {
        let record = TransactionRecord {
            tons: Some(QuantityValue::Number(0.0)),
            quantity: Some(QuantityValue::Text("n/a".to_string())),
            qty: Some(QuantityValue::Text("12.5".to_string())),
            total_quantity: Some(QuantityValue::Number(99.0)),
            ..order("emp-1", "confirmed", "2024-06-01")
        };

        assert_eq!(classify(&record).quantity, 12.5);
    }

    #[test]
    fn test_completed_without_quantity_still_counts() {
        let result = classify(&order("emp-1", "completed", "2024-06-01"));

        assert!(result.is_achieved);
        assert_eq!(result.quantity, 0.0);
    }

    #[test]
    fn test_completed_without_date_is_excluded() {
        let record = TransactionRecord {
            created_at: None,
            bags: Some(QuantityValue::Number(10.0)),
            ..order("emp-1", "completed", "")
        };

        let result = classify(&record);

        assert!(!result.is_achieved);
        assert_eq!(result.quantity, 0.0);
    }
}

#[cfg(test)]
mod aggregation_tests {
    use super::*;

    fn march_orders() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                tons: Some(QuantityValue::Number(300.0)),
                ..order("emp-1", "completed", "2024-03-05")
            },
            TransactionRecord {
                bags: Some(QuantityValue::Number(200.0)),
                ..order("emp-1", "Delivered", "2024-03-28T16:00:00+00:00")
            },
            TransactionRecord {
                bags: Some(QuantityValue::Number(999.0)),
                ..order("emp-1", "cancelled", "2024-03-10")
            },
        ]
    }

    #[test]
    fn test_march_achievement_against_target() {
        let mut targets = MonthSeries::zeroed(2024);
        targets.values[0] = 1000.0;
        targets.values[1] = 1000.0;
        targets.values[2] = 1000.0;

        let achievement = aggregate_achievement(&march_orders(), 2024);
        let summary = calculate_progress(&targets, &achievement.achieved, 2);

        assert_eq!(achievement.achieved.values[2], 500.0);
        assert_eq!(achievement.completed_counts[2], 2);
        assert_eq!(summary.monthly_percentages[2], 50.0);
        assert_eq!(summary.current_month.remaining, 500.0);
        assert!(!summary.current_month.is_achieved);
    }

    #[test]
    fn test_year_totals_percentage() {
        let targets = MonthSeries::from_values(2024, [1000.0; 12]);
        let mut achieved = MonthSeries::zeroed(2024);
        achieved.values[0] = 1000.0;
        achieved.values[1] = 1500.0;
        achieved.values[2] = 500.0;

        let summary = calculate_progress(&targets, &achieved, 0);

        assert_eq!(summary.year_totals.target, 12000.0);
        assert_eq!(summary.year_totals.achieved, 3000.0);
        assert_eq!(summary.year_totals.percentage, 25.0);
    }

    #[test]
    fn test_zero_targets_never_divide() {
        let targets = MonthSeries::zeroed(2024);
        let achievement = aggregate_achievement(&march_orders(), 2024);

        let summary = calculate_progress(&targets, &achievement.achieved, 2);

        for (i, pct) in summary.monthly_percentages.iter().enumerate() {
            assert_eq!(*pct, 0.0, "month {} must be 0 without a target", i);
        }
        assert_eq!(summary.year_totals.percentage, 0.0);
    }

    #[test]
    fn test_previous_year_orders_are_ignored() {
        let records = vec![
            TransactionRecord {
                tons: Some(QuantityValue::Number(700.0)),
                ..order("emp-1", "completed", "2023-03-20")
            },
            TransactionRecord {
                tons: Some(QuantityValue::Number(40.0)),
                ..order("emp-1", "completed", "2024-03-20")
            },
        ];

        let achievement = aggregate_achievement(&records, 2024);

        assert_eq!(achievement.achieved.values[2], 40.0);
        assert_eq!(achievement.achieved.total(), 40.0);
        assert_eq!(achievement.out_of_year, 1);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = march_orders();

        let first = aggregate_achievement(&records, 2024);
        let second = aggregate_achievement(&records, 2024);

        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_record_does_not_void_month() {
        let mut records = march_orders();
        records.push(TransactionRecord {
            tons: Some(QuantityValue::Number(50.0)),
            ..order("emp-1", "completed", "31/03/2024")
        });

        let achievement = aggregate_achievement(&records, 2024);

        assert_eq!(achievement.achieved.values[2], 500.0);
        assert_eq!(achievement.malformed, 1);
    }
}

#[cfg(test)]
mod progress_service_tests {
    use super::*;

    fn seeded_store() -> Arc<InMemoryStore> {
        let targets = vec![
            target("emp-1", "2024-01", 1000.0),
            target("emp-1", "2024-02", 1000.0),
            target("emp-1", "2024-03", 1000.0),
            target("emp-1", "2024-06", 400.0),
            target("emp-1", "2023-12", 5000.0),
            target("emp-2", "2024-06", 100.0),
        ];
        let orders = vec![
            TransactionRecord {
                tons: Some(QuantityValue::Number(300.0)),
                ..order("emp-1", "completed", "2024-03-02")
            },
            TransactionRecord {
                tons: Some(QuantityValue::Number(200.0)),
                ..order("emp-1", "delivered", "2024-03-18")
            },
            TransactionRecord {
                quantity: Some(QuantityValue::Number(450.0)),
                ..order("emp-1", "confirmed", "2024-06-03")
            },
            TransactionRecord {
                tons: Some(QuantityValue::Number(800.0)),
                ..order("emp-1", "completed", "2023-12-30")
            },
            TransactionRecord {
                bags: Some(QuantityValue::Number(60.0)),
                ..order("emp-2", "completed", "2024-06-10")
            },
        ];
        Arc::new(InMemoryStore::with_data(targets, orders))
    }

    fn service(store: &Arc<InMemoryStore>) -> ProgressService<InMemoryStore, InMemoryStore> {
        ProgressService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_year_progress_has_twelve_aligned_months() {
        let store = seeded_store();

        let progress = service(&store)
            .compute_year_progress("emp-1", 2024, june_2024())
            .await
            .unwrap();

        assert_eq!(progress.months.len(), 12);
        assert_eq!(progress.targets.len(), 12);
        assert_eq!(progress.achieved.len(), 12);
        assert_eq!(progress.monthly_percentages.len(), 12);
        assert_eq!(progress.months[0].to_string(), "2024-01");
        assert_eq!(progress.months[11].to_string(), "2024-12");

        assert_eq!(progress.targets[2], 1000.0);
        assert_eq!(progress.achieved[2], 500.0);
        assert_eq!(progress.monthly_percentages[2], 50.0);
        assert_eq!(progress.completed_orders[2], 2);
        assert_eq!(progress.achieved[11], 0.0, "December 2023 order must not leak into 2024");
        assert_eq!(progress.targets[11], 0.0);
    }

    #[tokio::test]
    async fn test_current_month_is_taken_from_today() {
        let store = seeded_store();

        let progress = service(&store)
            .compute_year_progress("emp-1", 2024, june_2024())
            .await
            .unwrap();

        let june = &progress.current_month;
        assert_eq!(june.month_key.to_string(), "2024-06");
        assert_eq!(june.target, 400.0);
        assert_eq!(june.achieved, 450.0);
        assert_eq!(june.percentage, 113.0);
        assert_eq!(june.remaining, 0.0);
        assert!(june.is_achieved);

        assert_eq!(progress.year_totals.target, 3400.0);
        assert_eq!(progress.year_totals.achieved, 950.0);
        assert!((progress.year_totals.percentage - 27.941).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_subject_without_targets_gets_zero_state() {
        let store = seeded_store();

        let progress = service(&store)
            .compute_year_progress("emp-9", 2024, june_2024())
            .await
            .unwrap();

        assert!(progress.targets.iter().all(|t| *t == 0.0));
        assert!(progress.monthly_percentages.iter().all(|p| *p == 0.0));
        assert!(!progress.current_month.is_achieved);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_zero_state() {
        let store = seeded_store();
        store.set_offline(true);

        let err = service(&store)
            .compute_year_progress("emp-1", 2024, june_2024())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DataUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_repeated_computation_is_identical() {
        let store = seeded_store();
        let service = service(&store);

        let first = service
            .compute_year_progress("emp-1", 2024, june_2024())
            .await
            .unwrap();
        let second = service
            .compute_year_progress("emp-1", 2024, june_2024())
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_team_progress_sums_members() {
        let store = seeded_store();
        let subjects = vec!["emp-1".to_string(), "emp-2".to_string()];

        let team = service(&store)
            .compute_team_progress(&subjects, 2024, june_2024())
            .await
            .unwrap();

        assert_eq!(team.members.len(), 2);
        assert_eq!(team.members[1].subject_id, "emp-2");
        assert_eq!(team.members[1].year_totals.achieved, 60.0);
        assert_eq!(team.members[1].current_month.percentage, 60.0);

        assert_eq!(team.combined.targets[5], 500.0);
        assert_eq!(team.combined.achieved[5], 510.0);
        assert_eq!(team.combined.completed_orders[5], 2);
        assert_eq!(team.combined.monthly_percentages[5], 102.0);
        assert_eq!(team.combined.subject_id, None);
    }

    #[tokio::test]
    async fn test_team_progress_requires_subjects() {
        let store = seeded_store();

        let err = service(&store)
            .compute_team_progress(&[], 2024, june_2024())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_year_without_four_digit_month_keys_is_rejected() {
        let store = seeded_store();
        let service = service(&store);

        let too_late = service
            .compute_year_progress("emp-1", 10000, june_2024())
            .await
            .unwrap_err();
        let team = service
            .compute_team_progress(&["emp-1".to_string()], -1, june_2024())
            .await
            .unwrap_err();

        assert!(matches!(too_late, Error::Validation(_)));
        assert!(matches!(team, Error::Validation(_)));
    }
}
