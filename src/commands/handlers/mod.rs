//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.0.0: Leaderboard commands (leaderboard, profile), forward, ping, help
//! - 2.0.0: Pair each handler with its `CommandDefinition`
//! - 1.0.0: Initial extraction from monolithic command handler

pub mod forward;
pub mod help;
pub mod leaderboard;
pub mod ping;
pub mod profile;

use anyhow::Result;
use log::warn;
use serenity::http::Http;
use std::sync::Arc;

use super::context::CommandContext;
use super::definition::CommandDefinition;
use super::handler::CommandHandler;
use super::invocation::Reply;
use super::registry::CommandEntry;
use crate::core::text::error_message;
use crate::features::leaderboard::{LeaderboardFailure, LeaderboardSnapshot};

/// Shown once when the leaderboard backend turns out to be asleep
pub const PATIENCE_NOTICE: &str = "*`This might take a while, please be patient...`*";

/// Every command the bot serves, in load order
pub fn create_all() -> Vec<CommandEntry> {
    vec![
        entry(forward::definition(), forward::ForwardHandler),
        entry(help::definition(), help::HelpHandler),
        entry(leaderboard::definition(), leaderboard::LeaderboardHandler),
        entry(ping::definition(), ping::PingHandler),
        entry(profile::definition(), profile::ProfileHandler),
    ]
}

fn entry<H: CommandHandler + 'static>(definition: CommandDefinition, handler: H) -> CommandEntry {
    (definition, Arc::new(handler))
}

pub fn fetch_failure_message(failure: LeaderboardFailure) -> String {
    error_message(&format!(
        "**Could not fetch latest leaderboard data: **`{failure}`\nPlease try again later!\n"
    ))
}

/// Fetch a snapshot while keeping `status` up to date
///
/// On failure the status reply is edited to the error and `None` is returned.
pub(crate) async fn fetch_snapshot(
    ctx: &CommandContext,
    http: &Http,
    status: &mut Reply,
) -> Result<Option<LeaderboardSnapshot>> {
    let result = {
        let status = &mut *status;
        ctx.leaderboard
            .fetch_leaderboard(move || async move {
                if let Err(e) = status.edit_content(http, PATIENCE_NOTICE).await {
                    warn!("Failed to post patience notice: {e}");
                }
            })
            .await
    };

    match result {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(failure) => {
            status
                .edit_content(http, fetch_failure_message(failure))
                .await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandRegistry;

    #[test]
    fn test_all_commands_build_without_collisions() {
        let registry = CommandRegistry::build(create_all()).unwrap();

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.descriptors().len(), 5);
        for key in [
            "forward", "send", "say", "help", "leaderboard", "ld", "leader", "leaders", "ping",
            "profile", "user", "pf", "contributor", "contrib",
        ] {
            assert!(registry.exists(key), "missing {key}");
        }
    }

    #[test]
    fn test_fetch_failure_message() {
        let message = fetch_failure_message(LeaderboardFailure::WakeTimeout);
        assert!(message.starts_with("## **`ERROR`**"));
        assert!(message.contains("`WAKE_TIMEOUT_ASSUMPTION`"));
    }
}
