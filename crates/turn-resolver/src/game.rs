//! A position together with the moves that led to it.

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use crate::error::TurnError;
use crate::notation::to_uci;
use crate::state::GameState;
use crate::terminal::{detect_terminal, Terminal};

/// The current game rebuilt from a [`GameState`].
///
/// Tracks the position keys reached so far so that fivefold repetition can
/// be detected across invocations.
#[derive(Debug, Clone)]
pub struct TrackedGame {
    /// Current position.
    position: Chess,
    /// UCI moves played since the starting position.
    history: Vec<String>,
    /// Repetition key of every position reached, starting position included.
    keys: Vec<String>,
    /// Position the history starts from, when not the standard one.
    start_fen: Option<String>,
    /// Whether the stored FEN was unusable and replaced.
    recovered: bool,
}

impl Default for TrackedGame {
    fn default() -> Self {
        let position = Chess::default();
        Self {
            keys: vec![repetition_key(&position)],
            position,
            history: Vec::new(),
            start_fen: None,
            recovered: false,
        }
    }
}

impl TrackedGame {
    /// Rebuilds the game from a stored state.
    ///
    /// An unparsable FEN is replaced by the starting position and the
    /// history dropped. The history is replayed from the start to recover
    /// repetition keys. If it does not lead to the stored FEN, the stored
    /// position becomes the new start and the history begins again from it.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let position = match parse_fen(&state.fen) {
            Some(position) => position,
            None => {
                tracing::warn!(
                    "Stored position {:?} is not valid FEN, resetting to the starting position",
                    state.fen
                );
                return Self {
                    recovered: true,
                    ..Self::default()
                };
            }
        };

        let start = match state.start_fen.as_deref() {
            Some(fen) => parse_fen(fen),
            None => Some(Chess::default()),
        };
        let replayed = start.and_then(|start| replay(start, &state.history));

        match replayed {
            Some(game) if fen_of(&game.position) == fen_of(&position) => Self {
                start_fen: state.start_fen.clone(),
                ..game
            },
            _ => {
                tracing::debug!(
                    "History of {} moves does not lead to the stored position, counting from here",
                    state.history.len()
                );
                let start_fen = fen_of(&position);
                Self {
                    keys: vec![repetition_key(&position)],
                    position,
                    history: Vec::new(),
                    start_fen: Some(start_fen),
                    recovered: false,
                }
            }
        }
    }

    /// Position the history starts from, when not the standard one.
    #[must_use]
    pub fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Side to move.
    #[must_use]
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// UCI moves played since the starting position.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Consumes the game, returning its move history.
    #[must_use]
    pub fn into_history(self) -> Vec<String> {
        self.history
    }

    /// Returns true if the stored FEN had to be replaced.
    #[must_use]
    pub fn recovered(&self) -> bool {
        self.recovered
    }

    /// Current position in FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        fen_of(&self.position)
    }

    /// How many times the current position has occurred.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        match self.keys.last() {
            Some(current) => self.keys.iter().filter(|k| *k == current).count(),
            None => 0,
        }
    }

    /// How the current position ends the game, if it does.
    #[must_use]
    pub fn terminal(&self) -> Option<Terminal> {
        detect_terminal(&self.position, self.repetitions())
    }

    /// Validates and plays a parsed coordinate move, returning its notation.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::IllegalMove`] if the move is not legal here.
    pub fn play_uci(&mut self, uci: &UciMove) -> Result<String, TurnError> {
        let m = uci
            .to_move(&self.position)
            .map_err(|_| TurnError::IllegalMove(uci.to_string()))?;
        Ok(self.play(&m))
    }

    /// Plays a move already known to be legal, returning its notation.
    pub fn play(&mut self, m: &Move) -> String {
        let uci = to_uci(m);
        self.position.play_unchecked(m);
        self.keys.push(repetition_key(&self.position));
        self.history.push(uci.clone());
        uci
    }
}

fn parse_fen(text: &str) -> Option<Chess> {
    let fen: Fen = text.trim().parse().ok()?;
    fen.into_position(CastlingMode::Standard).ok()
}

fn fen_of(position: &Chess) -> String {
    Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
}

/// Placement, side to move, castling rights and en passant square.
///
/// Move counters are excluded so that identical positions compare equal.
fn repetition_key(position: &Chess) -> String {
    fen_of(position)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

fn replay(start: Chess, history: &[String]) -> Option<TrackedGame> {
    let mut game = TrackedGame {
        keys: vec![repetition_key(&start)],
        position: start,
        ..TrackedGame::default()
    };
    for text in history {
        let uci: UciMove = text.parse().ok()?;
        game.play_uci(&uci).ok()?;
    }
    Some(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::STARTING_FEN;

    fn state_with(fen: &str, history: &[&str]) -> GameState {
        GameState {
            fen: fen.to_string(),
            history: history.iter().map(|s| s.to_string()).collect(),
            ..GameState::default()
        }
    }

    fn play_all(game: &mut TrackedGame, moves: &[&str]) {
        for m in moves {
            let uci: UciMove = m.parse().unwrap();
            game.play_uci(&uci).unwrap();
        }
    }

    #[test]
    fn test_default_is_starting_position() {
        let game = TrackedGame::default();
        assert_eq!(game.fen(), STARTING_FEN);
        assert_eq!(game.repetitions(), 1);
        assert!(game.terminal().is_none());
    }

    #[test]
    fn test_corrupt_fen_recovers() {
        let game = TrackedGame::from_state(&state_with("not a fen", &["e2e4"]));

        assert!(game.recovered());
        assert_eq!(game.fen(), STARTING_FEN);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_play_records_history_and_fen() {
        let mut game = TrackedGame::default();
        play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);

        assert_eq!(game.history(), ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut game = TrackedGame::default();
        let uci: UciMove = "e2e5".parse().unwrap();

        let result = game.play_uci(&uci);

        assert!(matches!(result, Err(TurnError::IllegalMove(m)) if m == "e2e5"));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_repetitions_counted_across_replay() {
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let mut game = TrackedGame::default();
        play_all(&mut game, &shuffle);
        play_all(&mut game, &shuffle);
        assert_eq!(game.repetitions(), 3);

        // Rebuild from the persisted form and keep counting
        let state = state_with(&game.fen(), &game.history().iter().map(String::as_str).collect::<Vec<_>>());
        let mut rebuilt = TrackedGame::from_state(&state);
        assert_eq!(rebuilt.repetitions(), 3);

        play_all(&mut rebuilt, &shuffle);
        assert_eq!(rebuilt.repetitions(), 4);
        assert!(rebuilt.terminal().is_none());

        play_all(&mut rebuilt, &shuffle);
        assert_eq!(rebuilt.repetitions(), 5);
        assert_eq!(
            rebuilt.terminal(),
            Some(Terminal::Draw(crate::terminal::DrawKind::FivefoldRepetition))
        );
    }

    #[test]
    fn test_mismatched_history_restarts_from_stored_position() {
        // History says 1.e4 but the board shows 1.d4
        let fen = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
        let mut game = TrackedGame::from_state(&state_with(fen, &["e2e4"]));

        assert!(!game.recovered());
        assert_eq!(game.repetitions(), 1);
        assert!(game.history().is_empty());
        assert_eq!(game.start_fen(), Some(fen));

        play_all(&mut game, &["d7d5"]);
        assert_eq!(game.history(), ["d7d5"]);
    }

    #[test]
    fn test_history_replays_from_start_fen() {
        let start = "rnbqkb1r/pppppppp/5n2/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 2 2";
        let mut game = TrackedGame::from_state(&state_with(start, &[]));
        play_all(&mut game, &["f3g1", "f6g8"]);

        let mut state = state_with(&game.fen(), &["f3g1", "f6g8"]);
        state.start_fen = game.start_fen().map(str::to_string);
        let rebuilt = TrackedGame::from_state(&state);

        assert_eq!(rebuilt.start_fen(), Some(start));
        assert_eq!(rebuilt.history(), ["f3g1", "f6g8"]);
        // Start, after Ng1, after Ng8
        assert_eq!(rebuilt.keys.len(), 3);
    }

    #[test]
    fn test_fivefold_from_history_less_record() {
        // A mid-game record with no history, as older files store it
        let start = "rnbqkb1r/pppppppp/5n2/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 2 2";
        let shuffle = ["f3g1", "f6g8", "g1f3", "g8f6"];
        let mut state = state_with(start, &[]);

        // One shuffle per stored round trip
        for round in 1..=4 {
            let mut game = TrackedGame::from_state(&state);
            play_all(&mut game, &shuffle);
            assert_eq!(game.repetitions(), round + 1);

            state.fen = game.fen();
            state.start_fen = game.start_fen().map(str::to_string);
            state.history = game.into_history();
        }

        let game = TrackedGame::from_state(&state);
        assert_eq!(game.repetitions(), 5);
        assert_eq!(
            game.terminal(),
            Some(Terminal::Draw(crate::terminal::DrawKind::FivefoldRepetition))
        );
    }

    #[test]
    fn test_castling_accepts_king_move_notation() {
        let mut game = TrackedGame::from_state(&state_with(
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
            &[],
        ));
        let uci: UciMove = "e1g1".parse().unwrap();

        assert_eq!(game.play_uci(&uci).unwrap(), "e1g1");
        assert!(game.fen().starts_with("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq"));
    }
}
