//! Command metadata, kept apart from the handler that executes it
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Channel,
}

impl From<OptionKind> for CommandOptionType {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::String => CommandOptionType::String,
            OptionKind::Channel => CommandOptionType::Channel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

/// Name, description, typed options and aliases of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<CommandOption>,
    pub aliases: Vec<&'static str>,
    /// In text form the last option takes the rest of the line verbatim
    pub raw_tail: bool,
}

impl CommandDefinition {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            options: Vec::new(),
            aliases: Vec::new(),
            raw_tail: false,
        }
    }

    pub fn option(
        mut self,
        name: &'static str,
        description: &'static str,
        kind: OptionKind,
        required: bool,
    ) -> Self {
        self.options.push(CommandOption {
            name,
            description,
            kind,
            required,
        });
        self
    }

    pub fn aliases(mut self, aliases: &[&'static str]) -> Self {
        self.aliases.extend_from_slice(aliases);
        self
    }

    /// Keep newlines and spacing of the final text argument
    pub fn raw_tail(mut self) -> Self {
        self.raw_tail = true;
        self
    }

    /// Slash-command descriptor for remote registration
    pub fn to_descriptor(&self) -> CreateApplicationCommand {
        let mut command = CreateApplicationCommand::default();
        command.name(self.name).description(self.description);
        for opt in &self.options {
            command.create_option(|option| {
                option
                    .name(opt.name)
                    .description(opt.description)
                    .kind(opt.kind.into())
                    .required(opt.required)
            });
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_builder_collects_options_and_aliases() {
        let def = CommandDefinition::new("forward", "Forward a message")
            .option("channel", "Target", OptionKind::Channel, true)
            .option("message", "Body", OptionKind::String, false)
            .aliases(&["send", "say"]);

        assert_eq!(def.options.len(), 2);
        assert_eq!(def.options[0].kind, OptionKind::Channel);
        assert!(!def.options[1].required);
        assert_eq!(def.aliases, vec!["send", "say"]);
        assert!(!def.raw_tail);
        assert!(def.raw_tail().raw_tail);
    }

    #[test]
    fn test_descriptor_contents() {
        let def = CommandDefinition::new("profile", "View a profile").option(
            "pfid",
            "Username",
            OptionKind::String,
            true,
        );
        let descriptor = def.to_descriptor();

        assert_eq!(
            descriptor.0.get("name").and_then(Value::as_str),
            Some("profile")
        );
        assert_eq!(
            descriptor.0.get("description").and_then(Value::as_str),
            Some("View a profile")
        );
        let options = descriptor.0.get("options").and_then(Value::as_array).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].get("name").and_then(Value::as_str), Some("pfid"));
        assert_eq!(options[0].get("required").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_descriptor_without_options() {
        let descriptor = CommandDefinition::new("ping", "Latency").to_descriptor();
        assert_eq!(descriptor.0.get("name").and_then(Value::as_str), Some("ping"));
    }
}
