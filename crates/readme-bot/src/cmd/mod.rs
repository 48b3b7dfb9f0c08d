//! CLI commands. Each `run` takes fully resolved settings; nothing below
//! reads the environment.

pub mod issue;
pub mod pet;
pub mod play;
pub mod render;

use anyhow::Context;
use board_render::BoardSvg;
use turn_resolver::{CaptureOrRandom, TurnOutcome, TurnResolver};

use crate::config::BotConfig;
use crate::readme::{self, chess_block, CHESS_END, CHESS_START};

/// Builds the resolver described by the configuration.
pub fn resolver(config: &BotConfig) -> TurnResolver<CaptureOrRandom> {
    let opponent = match config.seed {
        Some(seed) => CaptureOrRandom::seeded(seed),
        None => CaptureOrRandom::from_entropy(),
    };
    TurnResolver::new(opponent).with_community_side(config.community_side)
}

/// Writes the board image and the README stats block for a resolved turn.
pub fn publish(config: &BotConfig, outcome: &TurnOutcome) -> anyhow::Result<()> {
    write_board(config, &outcome.display_fen, Some(&outcome.last_ply))?;

    let block = chess_block(&outcome.state.stats, &outcome.state.last_move);
    readme::update_file(&config.readme_path, CHESS_START, CHESS_END, &block)
        .with_context(|| format!("Failed to update {}", config.readme_path.display()))?;
    Ok(())
}

fn write_board(config: &BotConfig, fen: &str, last_move: Option<&str>) -> anyhow::Result<()> {
    BoardSvg::from_fen(fen, last_move)
        .write_to(&config.board_path)
        .with_context(|| format!("Failed to write {}", config.board_path.display()))
}
