//! Inbound event dispatch
//!
//! Turns a prefixed text message or a slash interaction into a registry
//! lookup and a handler call. Handler errors stop here: they are logged and
//! the user gets a generic failure reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, error, info};
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use super::definition::CommandDefinition;
use super::invocation::Invocation;
use super::registry::CommandRegistry;

pub const FAILURE_REPLY: &str =
    "❌ Sorry, I encountered an error processing your command. Please try again.";

pub fn unknown_command_reply(name: &str) -> String {
    format!("Unknown command: `{name}`")
}

/// Where one inbound event ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not addressed to the bot (other bots, no prefix)
    Ignored,
    Unknown(String),
    Replied(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCommand {
    /// Lowercased command token, prefix stripped
    pub name: String,
    /// Everything after the command token, as typed
    pub rest: String,
}

impl TextCommand {
    /// Positional args for `definition`
    ///
    /// Tokens are whitespace-split, except that a `raw_tail` command gets the
    /// remainder after its leading options verbatim as the last arg.
    pub fn args_for(&self, definition: &CommandDefinition) -> Vec<String> {
        if !definition.raw_tail || definition.options.is_empty() {
            return self.rest.split_whitespace().map(str::to_string).collect();
        }

        let mut args = Vec::new();
        let mut remainder = self.rest.as_str();
        for _ in 1..definition.options.len() {
            let Some((token, tail)) = next_token(remainder) else {
                break;
            };
            args.push(token.to_string());
            remainder = tail;
        }

        let tail = remainder.trim_start();
        if !tail.is_empty() {
            args.push(tail.to_string());
        }
        args
    }
}

/// First whitespace-delimited token and the untouched text after it
fn next_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some(text.split_at(end))
}

/// Split `<prefix><name> rest...`
///
/// The prefix matches ASCII case-insensitively. Returns `None` when the
/// content does not start with the prefix immediately followed by a command
/// token.
pub fn parse_text_command(content: &str, prefix: &str) -> Option<TextCommand> {
    let content = content.trim_start();
    let head = content.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let rest = &content[prefix.len()..];
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    let (name, tail) = next_token(rest)?;
    Some(TextCommand {
        name: name.to_lowercase(),
        rest: tail.trim_start().to_string(),
    })
}

/// Slash options as positional args, in declared order
///
/// Stops at the first option the user left out so later values never shift
/// into an earlier position.
pub fn ordered_args<F>(definition: &CommandDefinition, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    definition
        .options
        .iter()
        .map_while(|option| lookup(option.name))
        .collect()
}

fn option_value(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .map(|value| match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        })
}

/// Log a finished execution and classify it
fn settle(request_id: Uuid, name: &str, result: anyhow::Result<()>) -> DispatchOutcome {
    match result {
        Ok(()) => {
            info!("[{request_id}] ✅ `{name}` completed");
            DispatchOutcome::Replied(name.to_string())
        }
        Err(e) => {
            error!("[{request_id}] ❌ Error handling command `{name}`: {e:?}");
            DispatchOutcome::Failed(name.to_string())
        }
    }
}

pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    ctx: Arc<CommandContext>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, ctx: Arc<CommandContext>) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_message(&self, serenity_ctx: &Context, msg: &Message) -> DispatchOutcome {
        if msg.author.bot {
            return DispatchOutcome::Ignored;
        }

        let Some(command) = parse_text_command(&msg.content, &self.ctx.config.prefix) else {
            return DispatchOutcome::Ignored;
        };

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] 📥 Text command `{}` | User: {} | Channel: {}",
            command.name, msg.author.id, msg.channel_id
        );

        let Some(registered) = self.registry.resolve(&command.name) else {
            debug!("[{request_id}] Unknown command `{}`", command.name);
            if let Err(why) = msg
                .reply(&serenity_ctx.http, unknown_command_reply(&command.name))
                .await
            {
                error!("[{request_id}] Failed to send unknown-command reply: {why}");
            }
            return DispatchOutcome::Unknown(command.name);
        };

        let args = command.args_for(&registered.definition);
        let invocation = Invocation::Message(msg);
        self.execute(request_id, serenity_ctx, &invocation, &command.name, &args)
            .await
    }

    pub async fn handle_interaction(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> DispatchOutcome {
        let request_id = Uuid::new_v4();
        let name = command.data.name.to_lowercase();
        info!(
            "[{request_id}] 📥 Slash command /{name} | User: {} | Channel: {}",
            command.user.id, command.channel_id
        );

        let Some(registered) = self.registry.resolve(&name) else {
            debug!("[{request_id}] Unknown slash command /{name}");
            if let Err(why) = command
                .create_interaction_response(&serenity_ctx.http, |r| {
                    r.kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|m| {
                            m.content(unknown_command_reply(&name)).ephemeral(true)
                        })
                })
                .await
            {
                error!("[{request_id}] Failed to send unknown-command reply: {why}");
            }
            return DispatchOutcome::Unknown(name);
        };

        let args = ordered_args(&registered.definition, |option| {
            option_value(&command.data.options, option)
        });

        let invocation = Invocation::Slash(command);
        self.execute(request_id, serenity_ctx, &invocation, &name, &args)
            .await
    }

    async fn execute(
        &self,
        request_id: Uuid,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        name: &str,
        args: &[String],
    ) -> DispatchOutcome {
        let result = self
            .registry
            .execute(name, self.ctx.clone(), serenity_ctx, invocation, args)
            .await;

        let outcome = settle(request_id, name, result);
        if matches!(outcome, DispatchOutcome::Failed(_)) {
            self.report_failure(request_id, serenity_ctx, invocation).await;
        }
        outcome
    }

    async fn report_failure(&self, request_id: Uuid, serenity_ctx: &Context, invocation: &Invocation<'_>) {
        match invocation {
            Invocation::Message(msg) => {
                if let Err(why) = msg.reply(&serenity_ctx.http, FAILURE_REPLY).await {
                    error!("[{request_id}] Failed to send error message: {why}");
                }
            }
            Invocation::Slash(command) => {
                // The handler may or may not have answered before failing
                if command
                    .edit_original_interaction_response(&serenity_ctx.http, |r| {
                        r.content(FAILURE_REPLY)
                    })
                    .await
                    .is_err()
                {
                    if let Err(why) = command
                        .create_interaction_response(&serenity_ctx.http, |r| {
                            r.kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|m| m.content(FAILURE_REPLY))
                        })
                        .await
                    {
                        error!("[{request_id}] Failed to send error message: {why}");
                    }
                }
            }
        }
    }
}
