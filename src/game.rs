//! Game driver: plays two move selectors against each other.
//!
//! The driver owns the authoritative board. Each turn it lends the board to
//! the engine to move, checks that the engine handed it back untouched and
//! returned a legal column, then applies that column and asks the referee
//! whether the game is over.

use tracing::{debug, info};

use crate::board::{Board, Player};
use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH};
use crate::engine::MoveSelector;
use crate::referee::{GameState, game_state};

/// Board geometry and win condition for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    pub win_length: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(Player),
    Draw,
}

/// Everything that happened in a finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Columns played, in order. Player one moved first.
    pub moves: Vec<usize>,
    pub result: GameResult,
    pub board: Board,
}

/// An engine broke the move-selection contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{engine} is configured as {actual} but was seated as {expected}")]
    SeatMismatch {
        engine: String,
        expected: Player,
        actual: Player,
    },

    #[error("{engine} ({player}) chose column {col}, which is full or off the board")]
    IllegalMove {
        engine: String,
        player: Player,
        col: usize,
    },

    #[error("{engine} ({player}) did not restore the board after choosing a move")]
    BoardNotRestored { engine: String, player: Player },
}

/// Play one game to completion. `first` moves first and must play as
/// [`Player::One`]; `second` must play as [`Player::Two`].
pub fn play_game(
    first: &mut dyn MoveSelector,
    second: &mut dyn MoveSelector,
    rules: Rules,
) -> Result<GameRecord, GameError> {
    play_game_with(first, second, rules, |_, _| {})
}

/// Like [`play_game`], calling `on_move` with the board and column after
/// every move.
pub fn play_game_with(
    first: &mut dyn MoveSelector,
    second: &mut dyn MoveSelector,
    rules: Rules,
    mut on_move: impl FnMut(&Board, usize),
) -> Result<GameRecord, GameError> {
    check_seat(&*first, Player::One)?;
    check_seat(&*second, Player::Two)?;

    let mut board = Board::new(rules.width, rules.height);
    let mut moves = Vec::with_capacity(rules.width * rules.height);
    let mut player = Player::One;

    loop {
        let engine: &mut dyn MoveSelector = match player {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };

        let before = board.clone();
        let col = engine.choose_move(&mut board);
        if board != before {
            return Err(GameError::BoardNotRestored {
                engine: engine.name().to_string(),
                player,
            });
        }
        if col >= board.width() || !board.can_make_move(col) {
            return Err(GameError::IllegalMove {
                engine: engine.name().to_string(),
                player,
                col,
            });
        }

        let (row, col) = board.make_move(col, player);
        moves.push(col);
        debug!(engine = engine.name(), %player, col, "move played");
        on_move(&board, col);

        let result = match game_state(&board, row, col, rules.win_length, player) {
            GameState::Ongoing => None,
            GameState::Win => Some(GameResult::Winner(player)),
            GameState::Draw => Some(GameResult::Draw),
        };
        if let Some(result) = result {
            info!(?result, moves = moves.len(), "game over");
            return Ok(GameRecord {
                moves,
                result,
                board,
            });
        }
        player = player.opponent();
    }
}

fn check_seat(engine: &dyn MoveSelector, expected: Player) -> Result<(), GameError> {
    if engine.player() != expected {
        return Err(GameError::SeatMismatch {
            engine: engine.name().to_string(),
            expected,
            actual: engine.player(),
        });
    }
    Ok(())
}
