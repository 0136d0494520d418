//! Order rows and the rules deciding how much each one counts toward a target.

pub mod classifier;
pub mod status;
pub mod transactions_model;
pub mod transactions_traits;

pub use classifier::{
    classify, classify_detailed, extract_quantity, parse_record_date, Classification,
    DetailedClassification, Rejection,
};
pub use status::{classify_status, normalize_status, StatusClass};
pub use transactions_model::{QuantityField, QuantityValue, TransactionRecord};
pub use transactions_traits::TransactionRepositoryTrait;
