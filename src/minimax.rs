//! Depth-limited minimax search with a positional heuristic.
//!
//! The search:
//! - plays an immediate win, or blocks an immediate loss, before searching
//! - otherwise scores every legal column with plain minimax (no pruning)
//! - evaluates leaves with a neighbourhood heuristic favouring central, clustered pieces
//!
//! The deadline is only checked between root columns, so one root branch may
//! overrun the budget by however long a full recursive search of it takes.

use std::thread;
use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Cell, Player};
use crate::constants::{LOSS_SCORE, WIN_SCORE, WINDOW_DX, WINDOW_DY};
use crate::engine::{EngineConfig, MoveSelector, Probe};
use crate::referee::GameState;

/// What to do with leftover budget once a move has been found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep until the full time budget has elapsed, so every searched move
    /// takes the same wall-clock time regardless of depth.
    #[default]
    FillBudget,
    /// Return as soon as the search finishes.
    Immediate,
}

pub struct MinimaxEngine {
    config: EngineConfig,
    depth: u32,
    pacing: Pacing,
}

impl MinimaxEngine {
    pub fn new(config: EngineConfig, depth: u32) -> Self {
        Self {
            config,
            depth,
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Root score of every column, without the tactical short-circuit.
    ///
    /// `None` marks a full column or one the deadline cut off.
    pub fn root_scores(&self, board: &mut Board) -> Vec<Option<i64>> {
        let start = Instant::now();
        let mut probe = Probe::new(board, self.config.win_length);
        self.search_root(&mut probe, start)
    }

    fn search_root(&self, probe: &mut Probe<'_>, start: Instant) -> Vec<Option<i64>> {
        let me = self.config.player;
        let mut scores = vec![None; probe.width()];
        for col in 0..probe.width() {
            if self.config.is_timeout(start) {
                debug!(col, "minimax deadline reached before finishing the root scan");
                break;
            }
            if !probe.can_make_move(col) {
                continue;
            }
            let (row, col) = probe.make_move(col, me);
            scores[col] = Some(self.minimize(probe, self.depth.saturating_sub(1), me, row, col));
            probe.unmake_move(col);
        }
        scores
    }

    /// Score of the position after `player` moved at `(row, col)`, with
    /// `player`'s opponent about to pick the reply that is best for us.
    fn maximize(
        &self,
        probe: &mut Probe<'_>,
        depth: u32,
        player: Player,
        row: usize,
        col: usize,
    ) -> i64 {
        let state = probe.state_after(row, col, player);
        if depth == 0 || state != GameState::Ongoing {
            return heuristic(probe.board(), self.config.player, state, player);
        }
        let mover = player.opponent();
        let mut best = LOSS_SCORE;
        for i in 0..probe.width() {
            if probe.can_make_move(i) {
                let (r, c) = probe.make_move(i, mover);
                best = best.max(self.minimize(probe, depth - 1, mover, r, c));
                probe.unmake_move(i);
            }
        }
        best
    }

    /// Score of the position after `player` moved at `(row, col)`, with
    /// `player`'s opponent about to pick the reply that is worst for us.
    fn minimize(
        &self,
        probe: &mut Probe<'_>,
        depth: u32,
        player: Player,
        row: usize,
        col: usize,
    ) -> i64 {
        let state = probe.state_after(row, col, player);
        if depth == 0 || state != GameState::Ongoing {
            return heuristic(probe.board(), self.config.player, state, player);
        }
        let mover = player.opponent();
        let mut best = WIN_SCORE;
        for i in 0..probe.width() {
            if probe.can_make_move(i) {
                let (r, c) = probe.make_move(i, mover);
                best = best.min(self.maximize(probe, depth - 1, mover, r, c));
                probe.unmake_move(i);
            }
        }
        best
    }

    /// Sleep out whatever is left of the budget.
    fn pace(&self, start: Instant) {
        if self.pacing == Pacing::FillBudget {
            if let Some(rest) = self.config.timeout.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
}

impl MoveSelector for MinimaxEngine {
    fn choose_move(&mut self, board: &mut Board) -> usize {
        let start = Instant::now();
        let me = self.config.player;
        let mut probe = Probe::new(board, self.config.win_length);

        if let Some(col) = (0..probe.width()).find(|&c| probe.is_winning_move(c, me)) {
            debug!(col, "minimax plays an immediate win");
            return col;
        }
        if let Some(col) = (0..probe.width()).find(|&c| probe.is_winning_move(c, me.opponent())) {
            debug!(col, "minimax blocks an immediate loss");
            return col;
        }

        let scores = self.search_root(&mut probe, start);
        let mut best_move = 0;
        let mut best_score = LOSS_SCORE;
        for (col, score) in scores.iter().enumerate() {
            if let Some(score) = *score {
                if score >= best_score {
                    best_score = score;
                    best_move = col;
                }
            }
        }
        debug!(?scores, best_move, best_score, "minimax root scan");

        if !probe.can_make_move(best_move) {
            best_move = probe.first_legal();
        }
        drop(probe);

        self.pace(start);
        best_move
    }

    fn player(&self) -> Player {
        self.config.player
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Positional weight of a column: 1 at the edges rising by one per step
/// toward the centre. For width 7 this is `[1, 2, 3, 4, 3, 2, 1]`.
pub fn column_weight(col: usize, width: usize) -> i64 {
    debug_assert!(col < width);
    (col.min(width - 1 - col) + 1) as i64
}

/// Evaluate `board` from `me`'s point of view.
///
/// `state` is the referee verdict for the move `last_player` just made.
/// Terminal positions collapse to the extreme scores: the best one when
/// `last_player` is `me`, the worst one otherwise.
///
/// Otherwise each occupied cell looks at a 3x5 window centred on it. Every
/// piece in the window whose point-mirror across the centre holds a piece of
/// the same owner earns that owner `2 * column_weight`; any other piece earns
/// its owner 1. Offsets whose cell or mirror falls off the board are skipped.
pub fn heuristic(board: &Board, me: Player, state: GameState, last_player: Player) -> i64 {
    if state != GameState::Ongoing {
        return if last_player == me { WIN_SCORE } else { LOSS_SCORE };
    }

    let width = board.width();
    let height = board.height();
    let mut p1: i64 = 0;
    let mut p2: i64 = 0;

    for i in 0..width {
        if board.get(height - 1, i) == Cell::Empty {
            continue;
        }
        let weight = column_weight(i, width);
        let top = height - board.column_height(i);
        for j in (top..height).rev() {
            let (ci, cj) = (i as isize, j as isize);
            for x in -WINDOW_DX..=WINDOW_DX {
                for y in -WINDOW_DY..=WINDOW_DY {
                    let (Some(cell), Some(mirror)) = (
                        board.get_checked(cj + y, ci + x),
                        board.get_checked(cj - y, ci - x),
                    ) else {
                        continue;
                    };
                    let score = if cell == mirror { 2 * weight } else { 1 };
                    match cell.owner() {
                        Some(Player::One) => p1 += score,
                        Some(Player::Two) => p2 += score,
                        None => {}
                    }
                }
            }
        }
    }

    match me {
        Player::One => p1 - p2,
        Player::Two => p2 - p1,
    }
}
