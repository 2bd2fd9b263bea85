//! Profile command handler
//!
//! Handles: profile (aliases: user, pf, contributor, contrib)

use anyhow::Result;
use async_trait::async_trait;
use serenity::prelude::Context;
use std::sync::Arc;

use super::fetch_snapshot;
use crate::commands::context::CommandContext;
use crate::commands::definition::{CommandDefinition, OptionKind};
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;
use crate::core::embeds::profile_embed;
use crate::core::text::error_message;

pub const SEARCHING_NOTICE: &str = "`Searching for User Data...`";

pub fn definition() -> CommandDefinition {
    CommandDefinition::new("profile", "View a contributor's leaderboard profile")
        .option(
            "pfid",
            "GitHub username of the contributor",
            OptionKind::String,
            true,
        )
        .aliases(&["user", "pf", "contributor", "contrib"])
}

/// GitHub logins never contain whitespace, so only the first token counts
pub fn parse_login(args: &[String]) -> Option<&str> {
    args.first()
        .map(|raw| raw.trim().trim_start_matches('@'))
        .filter(|login| !login.is_empty() && !login.contains(char::is_whitespace))
}

pub struct ProfileHandler;

#[async_trait]
impl CommandHandler for ProfileHandler {
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        args: &[String],
    ) -> Result<()> {
        let http = &serenity_ctx.http;
        let Some(login) = parse_login(args) else {
            invocation
                .reply(http, error_message("Invalid username provided."))
                .await?;
            return Ok(());
        };

        let mut status = invocation.reply(http, SEARCHING_NOTICE).await?;
        let Some(snapshot) = fetch_snapshot(&ctx, http, &mut status).await? else {
            return Ok(());
        };

        match snapshot.find_contributor(login) {
            Some((rank, record)) => {
                let embed = profile_embed(
                    rank,
                    record,
                    &ctx.config.bot_avatar_url,
                    &snapshot.updated_timestring,
                );
                status.edit_embed(http, embed).await
            }
            None => {
                status
                    .edit_content(
                        http,
                        error_message("No contributor with specified username found."),
                    )
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(parse_login(&args(&["octocat"])), Some("octocat"));
        assert_eq!(parse_login(&args(&["@hubot", "extra"])), Some("hubot"));
        assert_eq!(parse_login(&args(&["  "])), None);
        assert_eq!(parse_login(&args(&["two words"])), None);
        assert_eq!(parse_login(&[]), None);
    }

    #[test]
    fn test_definition_requires_username() {
        let def = definition();
        assert_eq!(def.aliases, vec!["user", "pf", "contributor", "contrib"]);
        assert_eq!(def.options[0].name, "pfid");
        assert!(def.options[0].required);
    }
}
