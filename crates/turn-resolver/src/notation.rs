//! Coordinate move notation (`e2e4`, `e7e8q`).

use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Move};

use crate::error::TurnError;

/// Returns true if `text` has the shape of a coordinate move.
///
/// Accepts a from-square, a to-square and an optional lowercase promotion
/// piece (`n`, `b`, `r`, `q`). Null moves and drops are not accepted.
#[must_use]
pub fn is_coordinate_move(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }

    let square = |file: u8, rank: u8| (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank);

    square(bytes[0], bytes[1])
        && square(bytes[2], bytes[3])
        && bytes
            .get(4)
            .map_or(true, |p| matches!(p, b'n' | b'b' | b'r' | b'q'))
}

/// Parses a coordinate move, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`TurnError::InvalidFormat`] if the text is not a coordinate move.
pub fn parse_move(text: &str) -> Result<UciMove, TurnError> {
    let text = text.trim();
    if !is_coordinate_move(text) {
        return Err(TurnError::InvalidFormat(text.to_string()));
    }

    text.parse::<UciMove>()
        .map_err(|_| TurnError::InvalidFormat(text.to_string()))
}

/// Formats a move in coordinate notation, with castling as the king's move.
#[must_use]
pub fn to_uci(m: &Move) -> String {
    m.to_uci(CastlingMode::Standard).to_string()
}
