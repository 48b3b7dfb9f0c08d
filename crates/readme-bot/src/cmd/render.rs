use turn_resolver::{GameStore, JsonFileStore};

use crate::cmd::write_board;
use crate::config::BotConfig;
use crate::readme::{self, chess_block, CHESS_END, CHESS_START};

/// Regenerates the board image and stats block from the stored state.
pub fn run(config: &BotConfig) -> anyhow::Result<()> {
    let state = JsonFileStore::new(&config.state_path).load()?;

    write_board(config, &state.fen, state.history.last().map(String::as_str))?;
    readme::update_file(
        &config.readme_path,
        CHESS_START,
        CHESS_END,
        &chess_block(&state.stats, &state.last_move),
    )?;

    tracing::info!("Rendered {} ({} moves played)", state.fen, state.history.len());
    Ok(())
}
