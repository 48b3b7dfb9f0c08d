//! The scripted opponent.
//!
//! Move selection is a strategy behind the [`Opponent`] trait so a stronger
//! player can replace the default without touching turn resolution.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shakmaty::{Chess, Move, Position};

/// Chooses the reply to the community's move.
pub trait Opponent {
    /// Name used in logs.
    fn name(&self) -> &str {
        "opponent"
    }

    /// Picks a legal move for the side to move, or `None` if there is none.
    fn choose_move(&mut self, position: &Chess) -> Option<Move>;
}

impl<T: Opponent + ?Sized> Opponent for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, position: &Chess) -> Option<Move> {
        (**self).choose_move(position)
    }
}

/// Returns the first capture in generation order, else a uniformly random legal move.
///
/// Capture value is not considered.
pub fn capture_or_random<R: Rng + ?Sized>(position: &Chess, rng: &mut R) -> Option<Move> {
    let moves = position.legal_moves();

    if let Some(capture) = moves.iter().find(|m| m.is_capture()) {
        return Some(capture.clone());
    }

    moves.choose(rng).cloned()
}

/// The default opponent: grab material when possible, otherwise play anything.
#[derive(Debug, Clone)]
pub struct CaptureOrRandom<R = StdRng> {
    rng: R,
}

impl CaptureOrRandom<StdRng> {
    /// Creates an opponent seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a deterministic opponent.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CaptureOrRandom<R> {
    /// Creates an opponent drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Opponent for CaptureOrRandom<R> {
    fn name(&self) -> &str {
        "capture-or-random"
    }

    fn choose_move(&mut self, position: &Chess) -> Option<Move> {
        capture_or_random(position, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shakmaty::fen::Fen;
    use shakmaty::CastlingMode;

    fn position(fen: &str) -> Chess {
        let fen: Fen = fen.parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    // Positions where the side to move has at least one capture
    const CAPTURE_POSITIONS: [&str; 4] = [
        // 1.d4 e5, white to move with dxe5
        "rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR w KQkq - 0 2",
        // 1.e4 d5 2.Nc3, black to move with dxe4
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 1 2",
        // Lone rook hanging next to the black king
        "4k3/4R3/8/8/8/8/8/4K3 b - - 0 1",
        // En passant is the only capture
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
    ];

    #[test]
    fn test_prefers_capture() {
        let pos = position("4k3/4R3/8/8/8/8/8/4K3 b - - 0 1");
        let mut opponent = CaptureOrRandom::seeded(1);

        let m = opponent.choose_move(&pos).unwrap();

        assert!(m.is_capture());
        assert_eq!(m.to(), shakmaty::Square::E7);
    }

    #[test]
    fn test_en_passant_counts_as_capture() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let m = capture_or_random(&pos, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(m.is_en_passant());
    }

    #[test]
    fn test_random_move_is_legal_without_captures() {
        let pos = Chess::default();
        let legal = pos.legal_moves();

        for seed in 0..20 {
            let m = capture_or_random(&pos, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(!m.is_capture());
            assert!(legal.contains(&m));
        }
    }

    #[test]
    fn test_random_choice_varies_with_seed() {
        let pos = Chess::default();
        let picks: std::collections::HashSet<String> = (0..50)
            .map(|seed| {
                let m = capture_or_random(&pos, &mut StdRng::seed_from_u64(seed)).unwrap();
                crate::notation::to_uci(&m)
            })
            .collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn test_no_move_when_game_over() {
        // Stalemated black king
        let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(capture_or_random(&pos, &mut StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn test_boxed_opponent_delegates() {
        let mut opponent: Box<dyn Opponent> = Box::new(CaptureOrRandom::seeded(9));
        assert_eq!(opponent.name(), "capture-or-random");
        assert!(opponent.choose_move(&Chess::default()).is_some());
    }

    proptest! {
        #[test]
        fn prop_capture_chosen_whenever_available(seed in any::<u64>(), idx in 0usize..4) {
            let pos = position(CAPTURE_POSITIONS[idx]);
            let mut opponent = CaptureOrRandom::seeded(seed);
            let m = opponent.choose_move(&pos).unwrap();
            prop_assert!(m.is_capture());
        }
    }
}
