//! Uniform random opponent.

use fastrand::Rng;

use crate::board::{Board, Player};
use crate::engine::MoveSelector;
use crate::playout::random_legal_move;

/// Plays a uniformly random legal column. Used as a fixed baseline opponent.
pub struct RandomEngine {
    player: Player,
    rng: Rng,
}

impl RandomEngine {
    pub fn new(player: Player, rng: Rng) -> Self {
        Self { player, rng }
    }

    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self::new(player, Rng::with_seed(seed))
    }
}

impl MoveSelector for RandomEngine {
    fn choose_move(&mut self, board: &mut Board) -> usize {
        random_legal_move(board, &mut self.rng).expect("random engine invoked on a full board")
    }

    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        "random"
    }
}
