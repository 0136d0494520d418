pub mod progress_calculator;
pub mod progress_model;
pub mod progress_service;
pub mod progress_session;

pub use progress_calculator::{calculate_progress, exact_percentage_of, percentage_of};
pub use progress_model::{
    CurrentMonthProgress, MemberProgress, ProgressSummary, TeamProgress, YearProgress, YearTotals,
};
pub use progress_service::{build_year_progress, ProgressService, ProgressServiceTrait};
pub use progress_session::{LoadTicket, ProgressSession};
