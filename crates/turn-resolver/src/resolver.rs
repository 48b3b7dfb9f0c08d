//! Turn resolution.
//!
//! One invocation resolves one turn: the community's move, at most one
//! opponent reply, and the end of the game if either move finished it.
//!
//! ```text
//! Idle -> UserMoveApplied -> { Terminal | OpponentMoveApplied } -> { Terminal | Persisted }
//! ```

use shakmaty::Color;

use crate::error::TurnError;
use crate::game::TrackedGame;
use crate::notation::parse_move;
use crate::opponent::Opponent;
use crate::state::{GameState, Side};
use crate::store::GameStore;
use crate::terminal::{DrawKind, GameEnd, Terminal};

/// How far a turn progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// State loaded, nothing applied yet.
    Idle,
    /// The community's move has been played.
    UserMoveApplied,
    /// The opponent has replied.
    OpponentMoveApplied,
    /// The game ended; stats updated and the board reset.
    Terminal,
    /// The turn was saved and play continues.
    Persisted,
}

/// Everything a caller needs after a resolved turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Last phase reached.
    pub phase: TurnPhase,
    /// The community's move in coordinate notation.
    pub user_move: String,
    /// The opponent's reply, if it moved.
    pub opponent_move: Option<String>,
    /// Opening move played by the opponent before the community's move,
    /// when the community plays Black and a new game starts.
    pub opening_move: Option<String>,
    /// How the game ended, if it did.
    pub end: Option<GameEnd>,
    /// Position to display. On a finished game this is the final position,
    /// not the reset board stored in `state`.
    pub display_fen: String,
    /// The last ply played, for highlighting.
    pub last_ply: String,
    /// True if the stored position was corrupt or already finished and was
    /// replaced by the start.
    pub recovered: bool,
    /// The state to persist.
    pub state: GameState,
}

impl TurnOutcome {
    /// Returns true if this turn finished the game.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.end.is_some()
    }

    /// One-line human readable result.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.end {
            Some(GameEnd::Draw(kind)) => {
                format!("Game Over: {} ({})", self.state.last_move, kind)
            }
            Some(_) => format!("Game Over: {}", self.state.last_move),
            None => format!("Turn complete. {}", self.state.last_move),
        }
    }
}

/// Resolves community turns against an [`Opponent`].
pub struct TurnResolver<O> {
    opponent: O,
    community: Side,
}

impl<O: Opponent> TurnResolver<O> {
    /// Creates a resolver where the community plays White.
    pub fn new(opponent: O) -> Self {
        Self {
            opponent,
            community: Side::White,
        }
    }

    /// Sets the colour the community plays.
    #[must_use]
    pub fn with_community_side(mut self, side: Side) -> Self {
        self.community = side;
        self
    }

    /// The colour the community plays.
    #[must_use]
    pub fn community_side(&self) -> Side {
        self.community
    }

    /// Loads the state, resolves the turn and saves the result.
    ///
    /// Nothing is written when the move is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::InvalidFormat`] or [`TurnError::IllegalMove`] for a
    /// rejected move, or [`TurnError::Store`] if the state cannot be read or written.
    pub fn play<S: GameStore + ?Sized>(
        &mut self,
        store: &S,
        input: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let state = store.load()?;
        let mut outcome = self.resolve(&state, input)?;

        store.save(&outcome.state)?;
        if outcome.phase != TurnPhase::Terminal {
            outcome.phase = TurnPhase::Persisted;
        }

        tracing::info!("{}", outcome.summary());
        Ok(outcome)
    }

    /// Resolves a turn without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::InvalidFormat`] if `input` is not a coordinate
    /// move, or [`TurnError::IllegalMove`] if it is not legal.
    pub fn resolve(&mut self, state: &GameState, input: &str) -> Result<TurnOutcome, TurnError> {
        let uci = parse_move(input)?;
        let mut game = TrackedGame::from_state(state);
        let mut recovered = game.recovered();

        // A finished game left on the board is abandoned, not credited
        if let Some(terminal) = game.terminal() {
            tracing::warn!(
                "Stored position is already over ({:?}), starting a new game",
                terminal
            );
            game = TrackedGame::default();
            recovered = true;
        }

        let community = Color::from(self.community);
        let mut opening_move = None;
        if game.turn() != community {
            opening_move = self.reply(&mut game);
        }
        let opening = opening_move
            .as_ref()
            .map(|m| format!("Bot opened with {}. ", m))
            .unwrap_or_default();

        let user_move = game.play_uci(&uci)?;
        tracing::info!("Community played {}", user_move);

        let mut next = state.clone();
        next.last_move = format!("{}Community played {}", opening, user_move);

        let mut phase = TurnPhase::UserMoveApplied;
        let mut opponent_move = None;
        let mut terminal = game.terminal();

        if terminal.is_none() {
            match self.reply(&mut game) {
                Some(reply) => {
                    next.last_move = format!(
                        "{}Bot played {} (in response to {})",
                        opening, reply, user_move
                    );
                    opponent_move = Some(reply);
                    phase = TurnPhase::OpponentMoveApplied;
                    terminal = game.terminal();
                }
                None => {
                    tracing::warn!("Opponent has no legal moves in an unfinished position");
                    terminal = Some(Terminal::Draw(DrawKind::NoLegalMoves));
                }
            }
        }

        let display_fen = game.fen();
        let last_ply = game
            .history()
            .last()
            .cloned()
            .unwrap_or_else(|| user_move.clone());
        next.fen = display_fen.clone();
        next.start_fen = game.start_fen().map(str::to_string);
        next.history = game.into_history();

        let end = terminal.map(|t| GameEnd::attribute(t, self.community));
        if let Some(end) = end {
            finish_game(&mut next, end);
            phase = TurnPhase::Terminal;
        }

        Ok(TurnOutcome {
            phase,
            user_move,
            opponent_move,
            opening_move,
            end,
            display_fen,
            last_ply,
            recovered,
            state: next,
        })
    }

    fn reply(&mut self, game: &mut TrackedGame) -> Option<String> {
        let m = self.opponent.choose_move(game.position())?;
        let reply = game.play(&m);
        tracing::debug!("{} chose {}", self.opponent.name(), reply);
        Some(reply)
    }
}

/// Records the result and resets the board for the next game.
fn finish_game(state: &mut GameState, end: GameEnd) {
    match end {
        GameEnd::CommunityWins => state.stats.community_wins += 1,
        GameEnd::BotWins => state.stats.bot_wins += 1,
        GameEnd::Draw(_) => state.stats.draws += 1,
    }
    state.last_move = end.message().to_string();
    state.reset_board();
    tracing::info!("Game over: {:?}", end);
}
