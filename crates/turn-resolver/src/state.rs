//! The persisted game record.

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::fmt;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Text stored as the last move of a fresh state.
pub const GAME_START: &str = "Game Start";

/// Running totals across finished games.
///
/// Counters only ever grow, and only when a game ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Games won by the community side.
    #[serde(default)]
    pub community_wins: u32,
    /// Games won by the scripted opponent.
    #[serde(default)]
    pub bot_wins: u32,
    /// Drawn games, including the degenerate "no legal moves" case.
    #[serde(default)]
    pub draws: u32,
}

impl Stats {
    /// Total number of finished games.
    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.community_wins + self.bot_wins + self.draws
    }
}

/// The record read at the start and written at the end of every turn.
///
/// # File Format
///
/// ```json
/// {
///   "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
///   "last_move": "Community played e2e4",
///   "history": ["e2e4"],
///   "stats": { "community_wins": 0, "bot_wins": 0, "draws": 0 }
/// }
/// ```
///
/// `history` and `stats` may be missing from older files and default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current position in FEN.
    #[serde(default = "default_fen")]
    pub fen: String,
    /// Display text describing the most recent ply.
    #[serde(default = "default_last_move")]
    pub last_move: String,
    /// UCI moves played since the starting position of the current game.
    #[serde(default)]
    pub history: Vec<String>,
    /// Position `history` starts from, when it is not the standard one.
    ///
    /// Set when a record's history could not be replayed to its FEN, so
    /// that moves from then on can be replayed again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_fen: Option<String>,
    /// Totals across finished games.
    #[serde(default)]
    pub stats: Stats,
}

fn default_fen() -> String {
    STARTING_FEN.to_string()
}

fn default_last_move() -> String {
    GAME_START.to_string()
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            fen: default_fen(),
            last_move: default_last_move(),
            history: Vec::new(),
            start_fen: None,
            stats: Stats::default(),
        }
    }
}

impl GameState {
    /// Starts a new game while keeping the accumulated stats.
    pub fn reset_board(&mut self) {
        self.fen = default_fen();
        self.history.clear();
        self.start_fen = None;
    }

    /// Returns true if the stored position is the standard starting position.
    #[must_use]
    pub fn is_fresh_game(&self) -> bool {
        self.fen == STARTING_FEN && self.history.is_empty() && self.start_fen.is_none()
    }
}

/// Which colour a participant plays.
///
/// Used in configuration so that the community colour is explicit rather
/// than assumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}
