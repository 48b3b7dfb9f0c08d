//! Configuration file loading for the README bot.
//!
//! Settings come from a TOML file; every field has a default so the bot
//! also runs with no file at all. Credentials are never read from the file,
//! they arrive on the command line or through the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use turn_resolver::Side;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// GitHub repository and link settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GitHubSection {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// `owner/name` of the profile repository. Overridden by `GITHUB_REPOSITORY`.
    #[serde(default)]
    pub repository: Option<String>,
    /// Public URL of the board image, linked from issue replies.
    #[serde(default)]
    pub board_image_url: Option<String>,
    /// Page where visitors pick their next move.
    #[serde(default)]
    pub play_url: Option<String>,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repository: None,
            board_image_url: None,
            play_url: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Cyber pet settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PetSection {
    /// Name shown in the README.
    #[serde(default = "default_pet_name")]
    pub name: String,
    /// GitHub user whose pushes feed the pet. Defaults to the repository owner.
    #[serde(default)]
    pub user: Option<String>,
}

impl Default for PetSection {
    fn default() -> Self {
        Self {
            name: default_pet_name(),
            user: None,
        }
    }
}

fn default_pet_name() -> String {
    "Git-Zilla".to_string()
}

/// Main bot configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Where the game state is persisted.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Where the board image is written.
    #[serde(default = "default_board_path")]
    pub board_path: PathBuf,
    /// README containing the marker blocks.
    #[serde(default = "default_readme_path")]
    pub readme_path: PathBuf,
    /// Colour played by the community. The opponent plays the other one.
    #[serde(default)]
    pub community_side: Side,
    /// Fixed seed for the opponent's random choices. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Issue title prefix that marks a move request.
    #[serde(default = "default_issue_prefix")]
    pub issue_prefix: String,
    #[serde(default)]
    pub github: GitHubSection,
    #[serde(default)]
    pub pet: PetSection,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("chess_data.json")
}

fn default_board_path() -> PathBuf {
    PathBuf::from("chess_board.svg")
}

fn default_readme_path() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_issue_prefix() -> String {
    "Chess Move:".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            board_path: default_board_path(),
            readme_path: default_readme_path(),
            community_side: Side::default(),
            seed: None,
            issue_prefix: default_issue_prefix(),
            github: GitHubSection::default(),
            pet: PetSection::default(),
        }
    }
}

impl BotConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = toml::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Default configuration file name, relative to the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("readme-bot.toml")
    }

    /// Resolves every relative path against `base`.
    #[must_use]
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for path in [
            &mut self.state_path,
            &mut self.board_path,
            &mut self.readme_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
