pub mod health;
pub mod leaderboard;
pub mod participant;
pub mod quiz;
pub mod response;
