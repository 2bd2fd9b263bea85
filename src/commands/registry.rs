//! Command registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Aliases, duplicate policies, slash descriptors and remote registration
//! - 1.0.0: Initial implementation for handler dispatch

use anyhow::Result;
use log::{error, info, warn};
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::Command;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use super::context::CommandContext;
use super::definition::CommandDefinition;
use super::handler::CommandHandler;
use super::invocation::Invocation;

/// A definition plus the handler that services it
pub type CommandEntry = (CommandDefinition, Arc<dyn CommandHandler>);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The command source is empty, so there is nothing to serve
    #[error("Commands directory does not exist or is empty")]
    DirectoryNotFound,

    #[error("Command `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("Alias `{alias}` of `{command}` collides with an existing command or alias")]
    AliasCollision { alias: String, command: String },

    #[error("Unknown command: `{0}`")]
    UnknownCommand(String),
}

/// What to do when two commands claim the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the build on any name or alias collision
    #[default]
    Reject,
    /// Later commands replace earlier ones in load order
    Overwrite,
}

pub struct RegisteredCommand {
    pub definition: CommandDefinition,
    pub handler: Arc<dyn CommandHandler>,
}

/// Name and alias lookup over a fixed set of commands
///
/// Built once at startup and never mutated afterwards.
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::build(handlers::create_all())?;
///
/// if registry.exists("ld") {
///     registry.execute("ld", ctx, &serenity_ctx, &invocation, &args).await?;
/// }
/// ```
pub struct CommandRegistry {
    commands: HashMap<&'static str, RegisteredCommand>,
    aliases: HashMap<&'static str, &'static str>,
    /// Primary names in load order
    order: Vec<&'static str>,
    descriptors: Vec<CreateApplicationCommand>,
}

impl CommandRegistry {
    /// Build with [`DuplicatePolicy::Reject`]
    pub fn build(entries: Vec<CommandEntry>) -> Result<Self, RegistryError> {
        Self::build_with_policy(entries, DuplicatePolicy::Reject)
    }

    pub fn build_with_policy(
        entries: Vec<CommandEntry>,
        policy: DuplicatePolicy,
    ) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::DirectoryNotFound);
        }

        let mut registry = Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
            descriptors: Vec::new(),
        };

        for (definition, handler) in entries {
            registry.insert(definition, handler, policy)?;
        }

        registry.descriptors = registry
            .order
            .iter()
            .filter_map(|name| registry.commands.get(name))
            .map(|command| command.definition.to_descriptor())
            .collect();

        Ok(registry)
    }

    fn insert(
        &mut self,
        definition: CommandDefinition,
        handler: Arc<dyn CommandHandler>,
        policy: DuplicatePolicy,
    ) -> Result<(), RegistryError> {
        let name = definition.name;

        if self.commands.contains_key(name) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::DuplicateName(name.to_string()));
                }
                DuplicatePolicy::Overwrite => {
                    warn!("Command `{name}` redefined, later definition wins");
                    self.aliases.retain(|_, target| *target != name);
                    self.order.retain(|existing| *existing != name);
                }
            }
        }

        if let Some(owner) = self.aliases.get(name).copied() {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::AliasCollision {
                        alias: name.to_string(),
                        command: owner.to_string(),
                    });
                }
                DuplicatePolicy::Overwrite => {
                    warn!("Command `{name}` shadows an alias of `{owner}`");
                    self.aliases.remove(name);
                }
            }
        }

        for &alias in &definition.aliases {
            let collides = alias == name
                || self.commands.contains_key(alias)
                || self.aliases.contains_key(alias);
            if !collides {
                self.aliases.insert(alias, name);
                continue;
            }
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::AliasCollision {
                        alias: alias.to_string(),
                        command: name.to_string(),
                    });
                }
                DuplicatePolicy::Overwrite if self.commands.contains_key(alias) || alias == name => {
                    warn!("Alias `{alias}` of `{name}` ignored, it is a command name");
                }
                DuplicatePolicy::Overwrite => {
                    warn!("Alias `{alias}` reassigned to `{name}`");
                    self.aliases.insert(alias, name);
                }
            }
        }

        info!("[cmds] loaded command: {name}");
        self.order.push(name);
        self.commands.insert(name, RegisteredCommand { definition, handler });
        Ok(())
    }

    /// Resolve an alias or primary name to its command
    pub fn resolve(&self, key: &str) -> Option<&RegisteredCommand> {
        let name = self.aliases.get(key).copied().unwrap_or(key);
        self.commands.get(name)
    }

    /// Whether `key` is a known name or alias
    pub fn exists(&self, key: &str) -> bool {
        self.aliases.contains_key(key) || self.commands.contains_key(key)
    }

    /// Run the command behind `key`, propagating the handler's error untouched
    pub async fn execute(
        &self,
        key: &str,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        invocation: &Invocation<'_>,
        args: &[String],
    ) -> Result<()> {
        self.run_with(key, |command| {
            command.handler.handle(ctx, serenity_ctx, invocation, args)
        })
        .await
    }

    /// Resolve `key` and hand the command to `call`
    ///
    /// Unresolvable keys fail with [`RegistryError::UnknownCommand`]; whatever
    /// `call` returns is passed through as is.
    pub async fn run_with<'a, T, F, Fut>(&'a self, key: &str, call: F) -> Result<T>
    where
        F: FnOnce(&'a RegisteredCommand) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let command = self
            .resolve(key)
            .ok_or_else(|| RegistryError::UnknownCommand(key.to_string()))?;
        call(command).await
    }

    /// Slash-command descriptors, in load order
    pub fn descriptors(&self) -> &[CreateApplicationCommand] {
        &self.descriptors
    }

    /// Primary names, in load order
    pub fn command_names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replace the global slash-command set in one batch call
    ///
    /// Missing credentials or API failures are logged, never returned: the bot
    /// still serves text commands without slash commands. Returns the count
    /// the remote side confirmed.
    pub async fn register_remote(&self, client_id: Option<u64>, token: Option<&str>) -> Option<usize> {
        let (Some(client_id), Some(token)) = (client_id, token) else {
            warn!("[cmds] Could not register slash commands: no client id or token provided");
            return None;
        };

        info!(
            "[cmds] Started refreshing {} application (/) commands.",
            self.descriptors.len()
        );

        let http = Http::new_with_application_id(token, client_id);
        let descriptors = self.descriptors.clone();
        match Command::set_global_application_commands(&http, |commands| {
            for descriptor in descriptors {
                commands.add_application_command(descriptor);
            }
            commands
        })
        .await
        {
            Ok(registered) => {
                info!(
                    "[cmds] ✅ Successfully reloaded {} application (/) commands.",
                    registered.len()
                );
                Some(registered.len())
            }
            Err(e) => {
                error!("[cmds] ❌ Failed to register slash commands: {e}");
                None
            }
        }
    }
}
