//! Forward command handler
//!
//! Handles: forward (aliases: send, say)
//!
//! Posts a message into another channel on behalf of an admin.

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use serenity::model::channel::{Channel, ChannelType};
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::definition::{CommandDefinition, OptionKind};
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;
use crate::core::text::{error_message, parse_channel_id, MESSAGE_LIMIT};

pub const INVALID_ARGUMENTS: &str = "**ERROR**: Invalid arguments provided!";

pub fn definition() -> CommandDefinition {
    CommandDefinition::new(
        "forward",
        "Forward a predefined message to a channel of your choice",
    )
    .option(
        "channel",
        "Channel in which the message will be forwarded",
        OptionKind::Channel,
        false,
    )
    .option("message", "Message to be forwarded", OptionKind::String, false)
    .aliases(&["send", "say"])
    .raw_tail()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRequest {
    pub channel_id: u64,
    pub message: String,
}

/// `args[0]` is the target channel (mention or raw ID), the rest is the body
pub fn parse_forward_args(args: &[String]) -> Option<ForwardRequest> {
    let (channel, words) = args.split_first()?;
    let channel_id = parse_channel_id(channel).parse::<u64>().ok()?;

    let message = words.join(" ");
    let length = message.chars().count();
    if length == 0 || length > MESSAGE_LIMIT {
        return None;
    }

    Some(ForwardRequest {
        channel_id,
        message,
    })
}

fn is_text_channel(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::Text
            | ChannelType::News
            | ChannelType::NewsThread
            | ChannelType::PublicThread
            | ChannelType::PrivateThread
    )
}

async fn is_sendable(serenity_ctx: &Context, channel_id: ChannelId) -> bool {
    match channel_id.to_channel(serenity_ctx).await {
        Ok(Channel::Guild(channel)) => is_text_channel(channel.kind),
        Ok(Channel::Private(_)) => true,
        Ok(_) => false,
        Err(e) => {
            warn!("Could not resolve forward target {channel_id}: {e}");
            false
        }
    }
}

pub struct ForwardHandler;

#[async_trait]
impl CommandHandler for ForwardHandler {
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        args: &[String],
    ) -> Result<()> {
        let http = &serenity_ctx.http;
        let user_id = invocation.user_id();

        if !ctx.config.is_admin(user_id.0) {
            warn!("Forward denied for non-admin user {user_id}");
            invocation
                .reply(http, error_message("You are not allowed to forward messages."))
                .await?;
            return Ok(());
        }

        let Some(request) = parse_forward_args(args) else {
            invocation.reply(http, INVALID_ARGUMENTS).await?;
            return Ok(());
        };

        let channel_id = ChannelId(request.channel_id);
        if !is_sendable(serenity_ctx, channel_id).await {
            invocation.reply(http, INVALID_ARGUMENTS).await?;
            return Ok(());
        }

        let mut status = invocation
            .reply(http, format!("Sending Message to <#{}>", channel_id.0))
            .await?;
        let sent = channel_id.say(http, &request.message).await?;
        info!("📨 Forwarded message from {user_id} to channel {channel_id}");

        status
            .edit_content(http, format!("Message sent: {}", sent.link()))
            .await
    }
}
