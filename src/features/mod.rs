//! # Features
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Leaderboard fetching and the keep-alive health endpoint

pub mod health;
pub mod leaderboard;

pub use health::HealthState;
pub use leaderboard::{LeaderboardClient, LeaderboardFailure, LeaderboardSnapshot};
