//! Leaderboard command handler
//!
//! Handles: leaderboard (aliases: ld, leader, leaders)
//!
//! Without a position shows the top three; with one shows that contributor's
//! card.

use anyhow::Result;
use async_trait::async_trait;
use serenity::prelude::Context;
use std::sync::Arc;

use super::fetch_snapshot;
use crate::commands::context::CommandContext;
use crate::commands::definition::{CommandDefinition, OptionKind};
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;
use crate::core::embeds::{profile_embed, top_three_embed};
use crate::core::text::error_message;

pub const FETCHING_NOTICE: &str = "`Fetching latest leaderboard...`";

const INVALID_POSITION: &str = "**Invalid position argument provided.**";

pub fn definition() -> CommandDefinition {
    CommandDefinition::new("leaderboard", "Shows the AcWoC leaderboard")
        .option(
            "position",
            "View the details of the person at nth position on the leaderboard",
            OptionKind::String,
            false,
        )
        .aliases(&["ld", "leader", "leaders"])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Top,
    Rank(usize),
    Invalid,
}

pub fn parse_position(args: &[String]) -> Position {
    match args.first() {
        None => Position::Top,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(rank) if rank > 0 => Position::Rank(rank),
            _ => Position::Invalid,
        },
    }
}

pub fn invalid_position_message() -> String {
    error_message(&format!(
        "{INVALID_POSITION}\nPosition should be an `integer` greater than `0`"
    ))
}

pub fn out_of_range_message(len: usize) -> String {
    error_message(&format!(
        "{INVALID_POSITION}\nPosition should be an `integer` not greater than `{len}`\n"
    ))
}

pub struct LeaderboardHandler;

#[async_trait]
impl CommandHandler for LeaderboardHandler {
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        args: &[String],
    ) -> Result<()> {
        let http = &serenity_ctx.http;
        let position = parse_position(args);
        if position == Position::Invalid {
            invocation.reply(http, invalid_position_message()).await?;
            return Ok(());
        }

        let mut status = invocation.reply(http, FETCHING_NOTICE).await?;
        let Some(snapshot) = fetch_snapshot(&ctx, http, &mut status).await? else {
            return Ok(());
        };

        let avatar = &ctx.config.bot_avatar_url;
        let footer = &snapshot.updated_timestring;
        let embed = match position {
            Position::Rank(rank) => match snapshot.at_rank(rank) {
                Some(record) => profile_embed(rank, record, avatar, footer),
                None => {
                    return status
                        .edit_content(http, out_of_range_message(snapshot.len()))
                        .await;
                }
            },
            _ => top_three_embed(snapshot.top(3), avatar, footer),
        };

        status.edit_embed(http, embed).await
    }
}
