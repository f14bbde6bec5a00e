//! The contract shared by every move-selection engine.
//!
//! An engine receives the driver's board by mutable reference for the length
//! of one [`MoveSelector::choose_move`] call. It may try moves on that board
//! through a [`Probe`], but must hand it back exactly as it found it.

use std::time::{Duration, Instant};

use crate::board::{Board, Player};
use crate::referee::{GameState, game_state};

/// Anything that can pick a column to play.
pub trait MoveSelector {
    /// Pick a legal column for [`MoveSelector::player`] on `board`.
    ///
    /// The board must have at least one legal column, and is restored
    /// cell-for-cell before this returns.
    fn choose_move(&mut self, board: &mut Board) -> usize;

    /// The side this engine plays.
    fn player(&self) -> Player;

    /// Short human-readable engine name.
    fn name(&self) -> &str;
}

/// Configuration shared by all engines. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub player: Player,
    pub win_length: usize,
    pub timeout: Duration,
}

impl EngineConfig {
    pub fn new(player: Player, win_length: usize, timeout_ms: u64) -> Self {
        assert!(win_length > 0, "win length must be positive");
        Self {
            player,
            win_length,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// True once the time budget has elapsed since `start`.
    #[inline]
    pub fn is_timeout(&self, start: Instant) -> bool {
        start.elapsed() >= self.timeout
    }
}

/// Mutable view of a borrowed board used during one search.
///
/// In debug builds every `make_move` is recorded and `unmake_move` must undo
/// the most recent one; the trail must be empty when the probe is dropped.
pub struct Probe<'b> {
    board: &'b mut Board,
    win_length: usize,
    #[cfg(debug_assertions)]
    trail: Vec<usize>,
}

impl<'b> Probe<'b> {
    pub fn new(board: &'b mut Board, win_length: usize) -> Self {
        assert!(
            board.legal_moves().next().is_some(),
            "engine invoked on a board with no legal column"
        );
        #[cfg(debug_assertions)]
        let trail = Vec::with_capacity(board.width() * board.height());
        Self {
            board,
            win_length,
            #[cfg(debug_assertions)]
            trail,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &*self.board
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.board.width()
    }

    #[inline]
    pub fn can_make_move(&self, col: usize) -> bool {
        self.board.can_make_move(col)
    }

    #[inline]
    pub fn column_height(&self, col: usize) -> usize {
        self.board.column_height(col)
    }

    #[inline]
    pub fn make_move(&mut self, col: usize, player: Player) -> (usize, usize) {
        #[cfg(debug_assertions)]
        self.trail.push(col);
        self.board.make_move(col, player)
    }

    #[inline]
    pub fn unmake_move(&mut self, col: usize) {
        #[cfg(debug_assertions)]
        {
            let last = self.trail.pop();
            assert_eq!(last, Some(col), "unmake_move out of LIFO order");
        }
        self.board.unmake_move(col);
    }

    /// Referee verdict for the piece `player` just placed at `(row, col)`.
    #[inline]
    pub fn state_after(&self, row: usize, col: usize, player: Player) -> GameState {
        game_state(&*self.board, row, col, self.win_length, player)
    }

    /// Whether dropping a piece for `player` in `col` wins on the spot.
    ///
    /// Illegal columns are never winning. The board is left untouched.
    pub fn is_winning_move(&mut self, col: usize, player: Player) -> bool {
        if !self.can_make_move(col) {
            return false;
        }
        let (row, col) = self.make_move(col, player);
        let state = self.state_after(row, col, player);
        self.unmake_move(col);
        state == GameState::Win
    }

    /// First legal column scanning from the left.
    pub fn first_legal(&self) -> usize {
        self.board
            .legal_moves()
            .next()
            .expect("probe boards always have a legal column")
    }
}

#[cfg(debug_assertions)]
impl Drop for Probe<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert!(
                self.trail.is_empty(),
                "probe dropped with {} unmade move(s)",
                self.trail.len()
            );
        }
    }
}
