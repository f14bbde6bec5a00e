//! Random playouts (random game simulation).
//!
//! A playout drops pieces into uniformly random legal columns, alternating
//! players, until the referee reports a win or a draw. Playouts run on a
//! scratch board owned by the caller, never on the board being searched.

use fastrand::Rng;

use crate::board::{Board, Player};
use crate::referee::{GameState, game_state};

/// Pick a uniformly random legal column, or `None` on a full board.
///
/// Does not allocate.
pub fn random_legal_move(board: &Board, rng: &mut Rng) -> Option<usize> {
    let count = board.legal_moves().count();
    if count == 0 {
        return None;
    }
    board.legal_moves().nth(rng.usize(..count))
}

/// Play random moves on `game` until the game ends.
///
/// `last_player` has just moved at `(row, col)`, so the opponent moves first.
/// Returns the final state and the player who made the last move.
pub fn random_playout(
    game: &mut Board,
    mut last_player: Player,
    mut row: usize,
    mut col: usize,
    win_length: usize,
    rng: &mut Rng,
) -> (GameState, Player) {
    let mut state = game_state(game, row, col, win_length, last_player);
    while state == GameState::Ongoing {
        last_player = last_player.opponent();
        let Some(mv) = random_legal_move(game, rng) else {
            // The referee reports a draw on a full board, so this is unreachable
            // for a well-behaved referee.
            debug_assert!(false, "ongoing game with no legal move");
            return (GameState::Draw, last_player.opponent());
        };
        (row, col) = game.make_move(mv, last_player);
        state = game_state(game, row, col, win_length, last_player);
    }
    (state, last_player)
}
