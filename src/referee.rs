//! Game-state classification after a move.
//!
//! The referee only looks at the lines passing through the last move, so a
//! call costs O(win_length) for the line scan plus O(width) for the draw test.

use crate::board::{Board, Cell, Player};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Win,
    Draw,
}

/// Directions of the four lines through a cell: horizontal, vertical and both diagonals.
const LINES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Classify the board after `player` dropped a piece at `(row, col)`.
pub fn game_state(
    board: &Board,
    row: usize,
    col: usize,
    win_length: usize,
    player: Player,
) -> GameState {
    let cell = player.cell();
    debug_assert_eq!(board.get(row, col), cell, "last move does not belong to {player}");

    for (dr, dc) in LINES {
        let run = 1
            + run_length(board, row, col, dr, dc, cell)
            + run_length(board, row, col, -dr, -dc, cell);
        if run >= win_length {
            return GameState::Win;
        }
    }

    if board.is_full() {
        GameState::Draw
    } else {
        GameState::Ongoing
    }
}

/// Count consecutive `cell`s from `(row, col)` in direction `(dr, dc)`, excluding the start.
fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while board.get_checked(r, c) == Some(cell) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}
