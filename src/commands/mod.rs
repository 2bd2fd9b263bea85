//! # Command System
//!
//! Prefixed text commands and slash (/) commands share one registry and one
//! set of handlers.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Unified dispatcher for text and slash invocations, declarative command definitions
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod definition;
pub mod dispatch;
pub mod handler;
pub mod handlers;
pub mod invocation;
pub mod registry;

pub use context::CommandContext;
pub use definition::{CommandDefinition, CommandOption, OptionKind};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use handler::CommandHandler;
pub use invocation::{Invocation, Reply};
pub use registry::{CommandEntry, CommandRegistry, DuplicatePolicy, RegistryError};
