// Core layer - configuration and shared helpers
pub mod core;

// Features layer - leaderboard backend and health endpoint
pub mod features;

// Application layer
pub mod commands;

#[cfg(test)]
mod test_support;

pub use core::Config;
