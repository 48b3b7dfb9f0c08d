//! Turn resolution for the profile README chess game.
//!
//! This crate provides:
//! - [`GameState`] - The persisted record (FEN, last move, history, stats)
//! - [`GameStore`] - Persistence abstraction with a JSON file implementation
//! - [`Opponent`] - Strategy trait for the scripted reply, with [`CaptureOrRandom`]
//! - [`TurnResolver`] - Validates a community move, lets the opponent reply,
//!   detects the end of the game and updates the stats
//!
//! Chess rules are delegated to [`shakmaty`]; nothing here searches or
//! evaluates positions.
//!
//! # Example
//!
//! ```
//! use turn_resolver::{CaptureOrRandom, GameState, TurnResolver};
//!
//! let mut resolver = TurnResolver::new(CaptureOrRandom::seeded(7));
//! let outcome = resolver.resolve(&GameState::default(), "e2e4").unwrap();
//! assert!(outcome.opponent_move.is_some());
//! assert!(outcome.state.last_move.contains("e2e4"));
//! ```

mod error;
mod game;
pub mod notation;
pub mod opponent;
mod resolver;
mod state;
pub mod store;
mod terminal;

pub use error::TurnError;
pub use game::TrackedGame;
pub use opponent::{capture_or_random, CaptureOrRandom, Opponent};
pub use resolver::{TurnOutcome, TurnPhase, TurnResolver};
pub use state::{GameState, Side, Stats, STARTING_FEN};
pub use store::{GameStore, JsonFileStore, MemoryStore, StoreError};
pub use terminal::{detect_terminal, DrawKind, GameEnd, Terminal};
