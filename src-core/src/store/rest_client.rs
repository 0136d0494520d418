//! Client for the hosted PostgREST-style backend.
//!
//! Targets and orders live in two tables; filters use the PostgREST
//! `column=op.value` query syntax.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDateTime};
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::errors::{Error, Result, ValidationError};
use crate::store::store_config::StoreConfig;
use crate::targets::{Target, TargetRepositoryTrait, TargetUpdate};
use crate::transactions::{TransactionRecord, TransactionRepositoryTrait};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Widest UTC offset in use. `created_at` filters are widened by this much
/// on both sides because the store compares instants while rows are filed
/// under the date written in their own offset.
const MAX_OFFSET_HOURS: i64 = 14;

/// Editable columns sent on PATCH
#[derive(Serialize)]
struct TargetPatch<'a> {
    subject_id: &'a str,
    month_key: &'a str,
    amount: f64,
}

pub struct RestStoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl RestStoreClient {
    pub fn new(config: StoreConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ValidationError::InvalidInput("Store base URL is empty".to_string()).into());
        }

        let api_key = config.api_key.trim();
        let bearer = config.access_token.as_deref().unwrap_or(api_key);
        let invalid_header =
            |_| ValidationError::InvalidInput("Store credentials contain invalid characters".to_string());

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid_header)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer)).map_err(invalid_header)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(RestStoreClient { client, config })
    }

    fn targets_url(&self) -> String {
        self.config.rest_url(&self.config.targets_table)
    }

    fn orders_url(&self) -> String {
        self.config.rest_url(&self.config.orders_table)
    }

    /// Send a request and decode the JSON array it returns. Any non-2xx
    /// status, 409 included, is `DataUnavailable`.
    async fn send_rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Vec<T>> {
        self.send_checked(request, context, None).await
    }

    /// Like `send_rows`, but HTTP 409 is reported as `on_conflict`.
    async fn send_write<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        on_conflict: Error,
    ) -> Result<Vec<T>> {
        self.send_checked(request, context, Some(on_conflict)).await
    }

    async fn send_checked<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        on_conflict: Option<Error>,
    ) -> Result<Vec<T>> {
        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                format!("could not connect: {}", e)
            } else {
                e.to_string()
            };
            error!("Store request '{}' failed: {}", context, reason);
            Error::DataUnavailable(format!("{}: {}", context, reason))
        })?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            if let Some(conflict) = on_conflict {
                debug!("Store request '{}' conflicted: {}", context, conflict);
                return Err(conflict);
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Store request '{}' returned HTTP {}: {}", context, status.as_u16(), body);
            return Err(Error::DataUnavailable(format!(
                "{}: store returned HTTP {}",
                context,
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows = serde_json::from_str::<Vec<T>>(&body)?;
        debug!("Store request '{}' returned {} rows", context, rows.len());
        Ok(rows)
    }
}

fn duplicate(subject_id: &str, month_key: &str) -> Error {
    Error::Validation(ValidationError::DuplicateTarget {
        subject_id: subject_id.to_string(),
        month_key: month_key.to_string(),
    })
}

#[async_trait]
impl TargetRepositoryTrait for RestStoreClient {
    async fn fetch_targets(&self, subject_id: &str, year_prefix: &str) -> Result<Vec<Target>> {
        let request = self.client.get(self.targets_url()).query(&[
            ("select", "*".to_string()),
            ("subject_id", format!("eq.{}", subject_id)),
            ("month_key", format!("like.{}*", year_prefix)),
            ("order", "month_key.asc".to_string()),
        ]);
        self.send_rows(request, "fetch targets").await
    }

    async fn get_target(&self, target_id: &str) -> Result<Option<Target>> {
        let request = self
            .client
            .get(self.targets_url())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", target_id))]);
        let rows = self.send_rows::<Target>(request, "get target").await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_target(&self, target: Target) -> Result<Target> {
        let request = self
            .client
            .post(self.targets_url())
            .header("Prefer", "return=representation")
            .json(&target);
        let conflict = duplicate(&target.subject_id, &target.month_key);
        let rows = self
            .send_write::<Target>(request, "insert target", conflict)
            .await?;
        rows.into_iter().next().ok_or_else(|| {
            Error::DataUnavailable("insert target: store returned no row".to_string())
        })
    }

    async fn update_target(&self, target: TargetUpdate) -> Result<Target> {
        let request = self
            .client
            .patch(self.targets_url())
            .query(&[("id", format!("eq.{}", target.id))])
            .header("Prefer", "return=representation")
            .json(&TargetPatch {
                subject_id: &target.subject_id,
                month_key: &target.month_key,
                amount: target.amount,
            });
        let conflict = duplicate(&target.subject_id, &target.month_key);
        let rows = self
            .send_write::<Target>(request, "update target", conflict)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Target '{}' not found", target.id)))
    }

    async fn delete_target(&self, target_id: &str) -> Result<usize> {
        let request = self
            .client
            .delete(self.targets_url())
            .query(&[("id", format!("eq.{}", target_id))])
            .header("Prefer", "return=representation");
        let rows = self.send_rows::<Target>(request, "delete target").await?;
        Ok(rows.len())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for RestStoreClient {
    async fn fetch_transactions(
        &self,
        subject_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<TransactionRecord>> {
        let start = start - ChronoDuration::hours(MAX_OFFSET_HOURS);
        let end = end + ChronoDuration::hours(MAX_OFFSET_HOURS);
        let request = self.client.get(self.orders_url()).query(&[
            ("select", "*".to_string()),
            (
                self.config.orders_subject_column.as_str(),
                format!("eq.{}", subject_id),
            ),
            ("created_at", format!("gte.{}", start.format(TIMESTAMP_FORMAT))),
            ("created_at", format!("lt.{}", end.format(TIMESTAMP_FORMAT))),
        ]);
        let mut rows = self
            .send_rows::<TransactionRecord>(request, "fetch orders")
            .await?;
        for row in rows.iter_mut() {
            if row.subject_id.is_none() {
                row.subject_id = Some(subject_id.to_string());
            }
        }
        Ok(rows)
    }
}
