//! Where a command came from, and how to answer it
//!
//! Handlers reply the same way whether they were triggered by a prefixed text
//! message or by a slash interaction.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use serenity::builder::CreateEmbed;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::model::id::UserId;

#[derive(Clone, Copy)]
pub enum Invocation<'a> {
    Message(&'a Message),
    Slash(&'a ApplicationCommandInteraction),
}

impl Invocation<'_> {
    pub fn user_id(&self) -> UserId {
        match self {
            Invocation::Message(msg) => msg.author.id,
            Invocation::Slash(command) => command.user.id,
        }
    }

    /// Send the first reply, returning a handle that can be edited later
    pub async fn reply(&self, http: &Http, content: impl Into<String>) -> Result<Reply> {
        let content = content.into();
        match self {
            Invocation::Message(msg) => {
                let sent = msg.reply(http, content).await?;
                Ok(Reply::Message(sent))
            }
            Invocation::Slash(command) => {
                command
                    .create_interaction_response(http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| m.content(content))
                    })
                    .await?;
                Ok(Reply::Interaction((*command).clone()))
            }
        }
    }
}

/// An already-sent reply
pub enum Reply {
    Message(Message),
    Interaction(ApplicationCommandInteraction),
}

impl Reply {
    pub async fn edit_content(&mut self, http: &Http, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        match self {
            Reply::Message(msg) => msg.edit(http, |m| m.content(content)).await?,
            Reply::Interaction(command) => {
                command
                    .edit_original_interaction_response(http, |r| r.content(content))
                    .await?;
            }
        }
        Ok(())
    }

    /// Replace the reply body with a single embed
    pub async fn edit_embed(&mut self, http: &Http, embed: CreateEmbed) -> Result<()> {
        match self {
            Reply::Message(msg) => msg.edit(http, |m| m.content("").set_embed(embed)).await?,
            Reply::Interaction(command) => {
                command
                    .edit_original_interaction_response(http, |r| r.content("").set_embed(embed))
                    .await?;
            }
        }
        Ok(())
    }
}
