pub mod targets_model;
pub mod targets_service;
pub mod targets_traits;

pub use targets_model::{NewTarget, Target, TargetUpdate};
pub use targets_service::{build_target_series, TargetService};
pub use targets_traits::{TargetRepositoryTrait, TargetServiceTrait};
