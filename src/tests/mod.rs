mod leaderboard;
mod quiz_tree;
mod registry;
mod session_code;
