//! Help command handler
//!
//! Handles: help

use anyhow::Result;
use async_trait::async_trait;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::definition::CommandDefinition;
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;

pub fn definition() -> CommandDefinition {
    CommandDefinition::new("help", "Replies with the help README.md link")
}

pub fn help_message(help_url: &str) -> String {
    if help_url.is_empty() {
        "Help is not configured for this bot yet.".to_string()
    } else {
        format!("### [View All Commands](<{help_url}>)")
    }
}

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        _args: &[String],
    ) -> Result<()> {
        invocation
            .reply(&serenity_ctx.http, help_message(&ctx.config.help_url))
            .await?;
        Ok(())
    }
}
