//! Monthly target and achievement tracking for feed-mill sales teams.
//!
//! Targets are assigned per subject (employee or manager) and calendar month.
//! Completed orders are classified, summed per month and compared against
//! those targets to produce the progress figures the dashboards show.

pub mod achievement;
pub mod errors;
pub mod periods;
pub mod progress;
pub mod store;
pub mod targets;
pub mod transactions;

pub use errors::{Error, Result, ValidationError};
