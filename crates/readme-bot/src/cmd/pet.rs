use anyhow::Context;
use chrono::NaiveDate;
use cyber_pet::{PetStatus, PET_END, PET_START};

use crate::config::BotConfig;
use crate::github::{GitHubClient, GitHubConfig};
use crate::readme;

/// Feeds the pet from the user's recent pushes and updates its README block.
///
/// An unreachable events feed leaves the pet hungry rather than failing.
pub fn run(config: &BotConfig, github: &GitHubConfig, today: NaiveDate) -> anyhow::Result<PetStatus> {
    let user = config
        .pet
        .user
        .as_deref()
        .or_else(|| github.owner())
        .context("No GitHub user for the pet: set pet.user or the repository")?;

    let events = GitHubClient::new(github)
        .user_events(user)
        .unwrap_or_else(|e| {
            tracing::warn!("Could not fetch events for {}: {}", user, e);
            Vec::new()
        });

    let status = PetStatus::from_events(&events, today);
    tracing::info!("{} is {} (streak {})", config.pet.name, status.mood, status.streak);

    readme::update_file(
        &config.readme_path,
        PET_START,
        PET_END,
        &status.render_block(&config.pet.name),
    )?;
    Ok(status)
}
