use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::transactions::transactions_model::TransactionRecord;

/// Read access to order rows. The core never writes them.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Orders of `subject_id` created in `[start, end)`, judged by the date
    /// as written on the row. A store that can only compare instants may
    /// return extra rows near the edges; callers drop them by month key.
    async fn fetch_transactions(
        &self,
        subject_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<TransactionRecord>>;
}
