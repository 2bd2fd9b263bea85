//! # Feature: Leaderboard
//!
//! Fetches the contributor leaderboard from a backend that may be asleep,
//! validates it and exposes typed snapshots.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod client;
pub mod fetcher;
pub mod model;

pub use client::{LeaderboardClient, LeaderboardFailure};
pub use fetcher::{wake_and_fetch, FetchError, RetryOptions};
pub use model::{LeaderboardRecord, LeaderboardSnapshot, StreakRecord, TRUSTED_URL_PREFIX};
