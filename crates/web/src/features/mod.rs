pub mod health;
pub mod leaderboard;
pub mod points;
pub mod seed;
