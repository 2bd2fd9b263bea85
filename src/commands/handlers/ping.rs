//! Ping command handler
//!
//! Handles: ping

use anyhow::Result;
use async_trait::async_trait;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Instant;

use crate::commands::context::CommandContext;
use crate::commands::definition::CommandDefinition;
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;

pub fn definition() -> CommandDefinition {
    CommandDefinition::new("ping", "Test bot's ping i.e latency")
}

pub fn latency_message(millis: u128) -> String {
    format!(":ping_pong:  `[SERVER -> DISCORD]: {millis}ms`")
}

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        _args: &[String],
    ) -> Result<()> {
        let started = Instant::now();
        let mut reply = invocation.reply(&serenity_ctx.http, ":ping_pong: _ _").await?;
        let latency = started.elapsed().as_millis();

        reply
            .edit_content(&serenity_ctx.http, latency_message(latency))
            .await
    }
}
