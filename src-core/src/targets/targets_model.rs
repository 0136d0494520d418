use serde::{Deserialize, Serialize};

/// Numeric monthly goal assigned to a subject (employee or manager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub subject_id: String,
    /// `YYYY-MM`
    #[serde(alias = "month")]
    pub month_key: String,
    #[serde(alias = "target_amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for assigning a new target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTarget {
    pub subject_id: String,
    pub month_key: String,
    pub amount: f64,
}

/// Payload for editing an existing target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetUpdate {
    pub id: String,
    pub subject_id: String,
    pub month_key: String,
    pub amount: f64,
}

impl Target {
    pub fn from_new(id: String, new_target: NewTarget) -> Self {
        Target {
            id,
            subject_id: new_target.subject_id,
            month_key: new_target.month_key,
            amount: new_target.amount,
            created_at: None,
            updated_at: None,
        }
    }
}
