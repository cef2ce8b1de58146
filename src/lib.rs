pub mod data;
pub mod match_analysis;
pub mod series_analysis;
pub mod state;
pub mod team_performance;
