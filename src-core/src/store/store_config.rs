use serde::{Deserialize, Serialize};

/// Connection settings for the hosted REST backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    pub api_key: String,
    /// Bearer token of the signed-in user. Falls back to `api_key`.
    pub access_token: Option<String>,
    pub targets_table: String,
    pub orders_table: String,
    /// Column of the orders table holding the subject id
    pub orders_subject_column: String,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            base_url: String::new(),
            api_key: String::new(),
            access_token: None,
            targets_table: "targets".to_string(),
            orders_table: "orders".to_string(),
            orders_subject_column: "employee_id".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }
}
