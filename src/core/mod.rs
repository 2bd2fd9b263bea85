//! # Core Module
//!
//! Configuration, embed builders and small text helpers.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Leaderboard embeds and text helpers replace message chunking
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod text;

pub use config::{Config, ConfigError};
