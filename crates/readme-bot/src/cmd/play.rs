use turn_resolver::{JsonFileStore, TurnOutcome};

use crate::cmd::{publish, resolver};
use crate::config::BotConfig;

/// Plays one community move and publishes the result.
///
/// A rejected move returns the [`turn_resolver::TurnError`] before anything
/// is written.
pub fn run(config: &BotConfig, mv: &str) -> anyhow::Result<TurnOutcome> {
    let store = JsonFileStore::new(&config.state_path);
    let outcome = resolver(config).play(&store, mv)?;

    if outcome.recovered {
        tracing::warn!("Stored position was corrupt; this turn started a new board");
    }
    publish(config, &outcome)?;
    Ok(outcome)
}
