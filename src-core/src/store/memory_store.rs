use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::errors::{Error, Result};
use crate::targets::{Target, TargetRepositoryTrait, TargetUpdate};
use crate::transactions::{parse_record_date, TransactionRecord, TransactionRepositoryTrait};

/// Store kept in process memory. Used by tests and for running the server
/// without a backend.
#[derive(Default)]
pub struct InMemoryStore {
    targets: RwLock<Vec<Target>>,
    orders: RwLock<Vec<TransactionRecord>>,
    offline: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(targets: Vec<Target>, orders: Vec<TransactionRecord>) -> Self {
        InMemoryStore {
            targets: RwLock::new(targets),
            orders: RwLock::new(orders),
            offline: AtomicBool::new(false),
        }
    }

    pub async fn add_order(&self, order: TransactionRecord) {
        self.orders.write().await.push(order);
    }

    /// Make every call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::DataUnavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TargetRepositoryTrait for InMemoryStore {
    async fn fetch_targets(&self, subject_id: &str, year_prefix: &str) -> Result<Vec<Target>> {
        self.ensure_online()?;
        let targets = self.targets.read().await;
        Ok(targets
            .iter()
            .filter(|t| t.subject_id == subject_id && t.month_key.starts_with(year_prefix))
            .cloned()
            .collect())
    }

    async fn get_target(&self, target_id: &str) -> Result<Option<Target>> {
        self.ensure_online()?;
        let targets = self.targets.read().await;
        Ok(targets.iter().find(|t| t.id == target_id).cloned())
    }

    async fn insert_target(&self, target: Target) -> Result<Target> {
        self.ensure_online()?;
        let now = chrono::Utc::now().to_rfc3339();
        let stored = Target {
            created_at: Some(now.clone()),
            updated_at: Some(now),
            ..target
        };
        self.targets.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update_target(&self, update: TargetUpdate) -> Result<Target> {
        self.ensure_online()?;
        let mut targets = self.targets.write().await;
        let target = targets
            .iter_mut()
            .find(|t| t.id == update.id)
            .ok_or_else(|| Error::NotFound(format!("Target '{}' not found", update.id)))?;
        target.subject_id = update.subject_id;
        target.month_key = update.month_key;
        target.amount = update.amount;
        target.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Ok(target.clone())
    }

    async fn delete_target(&self, target_id: &str) -> Result<usize> {
        self.ensure_online()?;
        let mut targets = self.targets.write().await;
        let before = targets.len();
        targets.retain(|t| t.id != target_id);
        Ok(before - targets.len())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryStore {
    async fn fetch_transactions(
        &self,
        subject_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<TransactionRecord>> {
        self.ensure_online()?;
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.subject_id.as_deref() == Some(subject_id))
            // Rows without a readable date are kept so classification counts them
            .filter(|o| match o.created_at.as_deref().and_then(parse_record_date) {
                Some(date) => date >= start.date() && date < end.date(),
                None => true,
            })
            .cloned()
            .collect())
    }
}
