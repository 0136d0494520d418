use serde::{Deserialize, Serialize};

/// Raw order/sale row as returned by the store.
///
/// Order tables have been created by different screens over time, so the
/// physical quantity may live under any of several column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tons: Option<QuantityValue>,
    #[serde(default)]
    pub quantity: Option<QuantityValue>,
    #[serde(default)]
    pub bags: Option<QuantityValue>,
    #[serde(default)]
    pub order_quantity: Option<QuantityValue>,
    #[serde(default)]
    pub qty: Option<QuantityValue>,
    #[serde(default)]
    pub weight: Option<QuantityValue>,
    #[serde(default)]
    pub total_quantity: Option<QuantityValue>,
}

/// A quantity column value. Some tables store numbers as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl QuantityValue {
    /// The value as a finite number greater than zero, if it is one.
    pub fn as_positive(&self) -> Option<f64> {
        let value = match self {
            QuantityValue::Number(n) => *n,
            QuantityValue::Text(s) => s.trim().parse::<f64>().ok()?,
            QuantityValue::Other(_) => return None,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

impl From<f64> for QuantityValue {
    fn from(value: f64) -> Self {
        QuantityValue::Number(value)
    }
}

impl From<&str> for QuantityValue {
    fn from(value: &str) -> Self {
        QuantityValue::Text(value.to_string())
    }
}

/// Quantity columns, in the order they are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityField {
    Tons,
    Quantity,
    Bags,
    OrderQuantity,
    Qty,
    Weight,
    TotalQuantity,
}

impl QuantityField {
    pub const PRIORITY: [QuantityField; 7] = [
        QuantityField::Tons,
        QuantityField::Quantity,
        QuantityField::Bags,
        QuantityField::OrderQuantity,
        QuantityField::Qty,
        QuantityField::Weight,
        QuantityField::TotalQuantity,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            QuantityField::Tons => "tons",
            QuantityField::Quantity => "quantity",
            QuantityField::Bags => "bags",
            QuantityField::OrderQuantity => "order_quantity",
            QuantityField::Qty => "qty",
            QuantityField::Weight => "weight",
            QuantityField::TotalQuantity => "total_quantity",
        }
    }

    pub fn read<'a>(&self, record: &'a TransactionRecord) -> Option<&'a QuantityValue> {
        match self {
            QuantityField::Tons => record.tons.as_ref(),
            QuantityField::Quantity => record.quantity.as_ref(),
            QuantityField::Bags => record.bags.as_ref(),
            QuantityField::OrderQuantity => record.order_quantity.as_ref(),
            QuantityField::Qty => record.qty.as_ref(),
            QuantityField::Weight => record.weight.as_ref(),
            QuantityField::TotalQuantity => record.total_quantity.as_ref(),
        }
    }
}
