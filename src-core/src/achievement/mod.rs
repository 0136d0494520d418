pub mod achievement_model;
pub mod aggregator;

pub use achievement_model::AchievementSeries;
pub use aggregator::aggregate_achievement;
