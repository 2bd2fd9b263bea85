//! Command handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: One trait for text and slash invocations; metadata moved to `CommandDefinition`
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;
use super::invocation::Invocation;

/// Behaviour of one command
///
/// Metadata (name, options, aliases) lives in the `CommandDefinition` the
/// handler is registered with, so the same handler type could back several
/// definitions.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         serenity_ctx: &Context,
///         invocation: &Invocation<'_>,
///         args: &[String],
///     ) -> Result<()> {
///         invocation.reply(&serenity_ctx.http, "Pong!").await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle one resolved command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context (config, leaderboard client)
    /// * `serenity_ctx` - Serenity context for Discord API calls
    /// * `invocation` - The message or interaction to reply to
    /// * `args` - Text arguments (see `TextCommand::args_for`), or slash options in declared order
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        args: &[String],
    ) -> Result<()>;
}
