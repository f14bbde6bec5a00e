//! Flat Monte Carlo move selection.
//!
//! Until the time budget runs out, the engine repeatedly picks a random legal
//! column, plays it, and finishes the game with a random playout. Each column
//! keeps a running score: +1 for every playout the engine went on to win, -1
//! for every playout it lost, and no change for draws. The best-scoring column
//! is tracked after every update and returned when time is up.
//!
//! The deadline is checked once per playout, so the engine can overrun its
//! budget by at most the length of one playout.

use std::time::Instant;

use fastrand::Rng;
use tracing::{debug, trace};

use crate::board::{Board, Cell, Player};
use crate::constants::NO_MOVE;
use crate::engine::{EngineConfig, MoveSelector, Probe};
use crate::playout::{random_legal_move, random_playout};
use crate::referee::GameState;

pub struct MonteCarloEngine {
    config: EngineConfig,
    rng: Rng,
    /// Best column found so far in the current call, or `NO_MOVE`.
    chosen_move: usize,
    /// Reused copy of the searched board that playouts run on.
    scratch: Option<Board>,
    /// Stop after this many playouts even if time remains.
    playout_limit: Option<u64>,
}

impl MonteCarloEngine {
    /// Create an engine drawing randomness from `rng`.
    pub fn new(config: EngineConfig, rng: Rng) -> Self {
        Self {
            config,
            rng,
            chosen_move: NO_MOVE,
            scratch: None,
            playout_limit: None,
        }
    }

    /// Create an engine with a reproducible random stream.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, Rng::with_seed(seed))
    }

    /// Cap the number of playouts per move. Together with a seeded `Rng`
    /// and a generous timeout this makes every choice reproducible.
    pub fn with_playout_limit(mut self, limit: u64) -> Self {
        self.playout_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fold one playout result into the column scores and refresh the choice.
    fn update_chosen_move(
        &mut self,
        values: &mut [f64],
        mv: usize,
        outcome: GameState,
        last_player: Player,
    ) {
        if outcome == GameState::Draw {
            return;
        }
        values[mv] += if last_player == self.config.player { 1.0 } else { -1.0 };

        for (i, &value) in values.iter().enumerate() {
            let current = match self.chosen_move {
                NO_MOVE => f64::NEG_INFINITY,
                best => values[best],
            };
            if value > current {
                self.chosen_move = i;
            }
        }
    }
}

/// Centre column of an odd-width board when it is still empty.
fn opening_move(board: &Board) -> Option<usize> {
    let width = board.width();
    if width % 2 == 0 {
        return None;
    }
    let middle = (width - 1) / 2;
    (board.get(board.height() - 1, middle) == Cell::Empty).then_some(middle)
}

impl MoveSelector for MonteCarloEngine {
    fn choose_move(&mut self, board: &mut Board) -> usize {
        if let Some(col) = opening_move(board) {
            debug!(col, "monte carlo opens in the centre column");
            return col;
        }

        let start = Instant::now();
        let me = self.config.player;
        let win_length = self.config.win_length;
        self.chosen_move = NO_MOVE;

        let mut values: Vec<f64> = (0..board.width())
            .map(|col| if board.can_make_move(col) { 0.0 } else { f64::NEG_INFINITY })
            .collect();

        let mut scratch = self.scratch.take().unwrap_or_else(|| board.clone());
        let mut probe = Probe::new(board, win_length);
        let mut playouts: u64 = 0;

        while !self.config.is_timeout(start)
            && self.playout_limit.is_none_or(|limit| playouts < limit)
        {
            let Some(mv) = random_legal_move(probe.board(), &mut self.rng) else {
                break;
            };
            let (row, col) = probe.make_move(mv, me);
            scratch.copy_from(probe.board());
            let (outcome, last_player) =
                random_playout(&mut scratch, me, row, col, win_length, &mut self.rng);
            trace!(mv, ?outcome, ?last_player, "playout finished");
            self.update_chosen_move(&mut values, mv, outcome, last_player);
            probe.unmake_move(mv);
            playouts += 1;
        }

        let next_move = match self.chosen_move {
            NO_MOVE => probe.first_legal(),
            best => best,
        };
        debug_assert!(probe.can_make_move(next_move));
        drop(probe);

        debug!(playouts, ?values, next_move, "monte carlo search finished");
        self.scratch = Some(scratch);
        self.chosen_move = NO_MOVE;
        next_move
    }

    fn player(&self) -> Player {
        self.config.player
    }

    fn name(&self) -> &str {
        "monte-carlo"
    }
}
