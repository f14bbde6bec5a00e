//! Dropline: move-selection engines for gravity connect-N games.
//!
//! Two interchangeable engines pick columns on a board of any size with any
//! win length:
//!
//! - [`minimax::MinimaxEngine`] - depth-limited minimax with a positional heuristic
//! - [`monte_carlo::MonteCarloEngine`] - time-boxed random playouts per column
//!
//! Both implement [`engine::MoveSelector`], borrow the caller's board for the
//! duration of one call and hand it back unchanged.
//!
//! ## Modules
//!
//! - [`constants`] - Default geometry, engine parameters and score bounds
//! - [`board`] - Board representation and move primitives
//! - [`referee`] - Win/draw detection after a move
//! - [`engine`] - The shared engine contract and the board probe
//! - [`minimax`] - Minimax search and heuristic
//! - [`playout`] - Random game simulation
//! - [`monte_carlo`] - Monte Carlo engine
//! - [`random`] - Uniform random opponent
//! - [`game`] - Plays two engines against each other
//!
//! ## Example
//!
//! ```
//! use dropline::board::{Board, Player};
//! use dropline::engine::{EngineConfig, MoveSelector};
//! use dropline::minimax::{MinimaxEngine, Pacing};
//!
//! let mut board = Board::new(7, 6);
//! board.make_move(3, Player::One);
//!
//! let config = EngineConfig::new(Player::Two, 4, 50);
//! let mut engine = MinimaxEngine::new(config, 3).with_pacing(Pacing::Immediate);
//! let col = engine.choose_move(&mut board);
//! assert!(board.can_make_move(col));
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod game;
pub mod minimax;
pub mod monte_carlo;
pub mod playout;
pub mod random;
pub mod referee;
