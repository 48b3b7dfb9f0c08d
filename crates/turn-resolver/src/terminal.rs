//! End-of-game detection and attribution.

use shakmaty::{Chess, Color, Position};
use std::fmt;

use crate::state::Side;

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of the same position after which the game is drawn.
pub const FIVEFOLD: usize = 5;

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// No legal moves, not in check.
    Stalemate,
    /// Neither side can deliver mate.
    InsufficientMaterial,
    /// 150 half-moves without a capture or pawn move.
    SeventyFiveMoveRule,
    /// The same position occurred five times.
    FivefoldRepetition,
    /// The opponent produced no move although the position was not finished.
    NoLegalMoves,
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawKind::Stalemate => "stalemate",
            DrawKind::InsufficientMaterial => "insufficient material",
            DrawKind::SeventyFiveMoveRule => "75-move rule",
            DrawKind::FivefoldRepetition => "fivefold repetition",
            DrawKind::NoLegalMoves => "no legal moves",
        };
        f.write_str(text)
    }
}

/// How a position ends the game, in board terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// The side to move is mated; `winner` delivered the mate.
    Checkmate { winner: Color },
    /// The game is drawn.
    Draw(DrawKind),
}

/// How a game ended, in terms of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The community delivered mate.
    CommunityWins,
    /// The scripted opponent delivered mate.
    BotWins,
    /// The game was drawn.
    Draw(DrawKind),
}

impl GameEnd {
    /// Attributes a terminal position given the colour the community plays.
    #[must_use]
    pub fn attribute(terminal: Terminal, community: Side) -> Self {
        match terminal {
            Terminal::Checkmate { winner } if Side::from(winner) == community => {
                GameEnd::CommunityWins
            }
            Terminal::Checkmate { .. } => GameEnd::BotWins,
            Terminal::Draw(kind) => GameEnd::Draw(kind),
        }
    }

    /// Display text stored as the last move once the game is over.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            GameEnd::CommunityWins => "Checkmate! Community Wins! 🎉",
            GameEnd::BotWins => "Checkmate! Bot Wins! 🤖",
            GameEnd::Draw(_) => "Game Drawn! 🤝",
        }
    }
}

/// Returns how the position ends the game, or `None` if play continues.
///
/// `repetitions` is the number of times the current position has occurred
/// in the game, including now. Checkmate takes precedence over every draw.
#[must_use]
pub fn detect_terminal(position: &Chess, repetitions: usize) -> Option<Terminal> {
    if position.is_checkmate() {
        return Some(Terminal::Checkmate {
            winner: !position.turn(),
        });
    }
    if position.is_stalemate() {
        return Some(Terminal::Draw(DrawKind::Stalemate));
    }
    if position.is_insufficient_material() {
        return Some(Terminal::Draw(DrawKind::InsufficientMaterial));
    }
    if position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
        return Some(Terminal::Draw(DrawKind::SeventyFiveMoveRule));
    }
    if repetitions >= FIVEFOLD {
        return Some(Terminal::Draw(DrawKind::FivefoldRepetition));
    }
    None
}
