pub mod app_state;
pub mod error;
pub mod leaderboard;
pub mod quiz;
pub mod results;
pub mod session;
