//! Profile README bot.
//!
//! Glues the turn resolver, the board renderer and the cyber pet to the
//! files of a profile repository and to GitHub issues:
//! - [`config`] - TOML settings with defaults for every field
//! - [`readme`] - marker-delimited block replacement
//! - [`github`] - issue comments and the user activity feed
//! - [`issue`] - move requests in issue titles and the replies to them
//! - [`cmd`] - one function per CLI command

pub mod cmd;
pub mod config;
pub mod github;
pub mod issue;
pub mod readme;

pub use config::{BotConfig, ConfigError};
pub use github::{GitHubClient, GitHubConfig, GitHubError, Notifier};
