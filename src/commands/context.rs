//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Carry config and leaderboard client
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::Config;
use crate::features::leaderboard::LeaderboardClient;

/// Read-only state shared by every command execution
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub leaderboard: LeaderboardClient,
}

impl CommandContext {
    pub fn new(config: Arc<Config>, leaderboard: LeaderboardClient) -> Self {
        Self { config, leaderboard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<CommandContext>();
    }
}
