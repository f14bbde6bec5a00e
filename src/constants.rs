//! Constants for board geometry, engine defaults and heuristic scoring.
//!
//! Board dimensions are runtime values carried by [`Board`](crate::board::Board);
//! the values here are only the defaults used by the driver and the CLI.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of columns (classic Connect Four).
pub const DEFAULT_WIDTH: usize = 7;

/// Default number of rows.
pub const DEFAULT_HEIGHT: usize = 6;

/// Default number of pieces in a line needed to win.
pub const DEFAULT_WIN_LENGTH: usize = 4;

// =============================================================================
// Engine Parameters
// =============================================================================

/// Default time budget per move, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default minimax search depth (in plies, counting the root move).
pub const DEFAULT_DEPTH: u32 = 4;

/// Sentinel for "no move chosen yet" in the Monte Carlo tracker.
pub const NO_MOVE: usize = usize::MAX;

// =============================================================================
// Heuristic
// =============================================================================

/// Horizontal radius of the neighbourhood window (3 columns wide).
pub const WINDOW_DX: isize = 1;

/// Vertical radius of the neighbourhood window (5 rows tall).
pub const WINDOW_DY: isize = 2;

/// Score of a position won by the searching player (or drawn on its move).
pub const WIN_SCORE: i64 = i64::MAX;

/// Score of a position lost by the searching player (or drawn on the opponent's move).
pub const LOSS_SCORE: i64 = i64::MIN;
