//! Integration tests for dropline.
//!
//! These exercise the engines through the public `MoveSelector` contract:
//! board restoration, legality, tactical priority, heuristic symmetry and
//! timing behaviour.

use std::time::{Duration, Instant};

use dropline::board::{Board, Player};
use dropline::engine::{EngineConfig, MoveSelector};
use dropline::game::{GameResult, Rules, play_game};
use dropline::minimax::{MinimaxEngine, Pacing, heuristic};
use dropline::monte_carlo::MonteCarloEngine;
use dropline::playout::random_legal_move;
use dropline::random::RandomEngine;
use dropline::referee::{GameState, game_state};
use quickcheck::quickcheck;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of columns, alternating from player one.
/// Stops early (returning `None`) if the sequence is illegal or ends the game.
fn setup_position(width: usize, height: usize, moves: &[usize]) -> Option<(Board, Player)> {
    let mut board = Board::new(width, height);
    let mut player = Player::One;
    for &col in moves {
        if col >= width || !board.can_make_move(col) {
            return None;
        }
        let (row, col) = board.make_move(col, player);
        if game_state(&board, row, col, 4, player) != GameState::Ongoing {
            return None;
        }
        player = player.opponent();
    }
    Some((board, player))
}

/// A random ongoing 7x6 position reached by `plies` random moves.
fn random_position(seed: u64, plies: usize) -> (Board, Player) {
    let mut rng = fastrand::Rng::with_seed(seed);
    loop {
        let mut board = Board::new(7, 6);
        let mut player = Player::One;
        let mut ongoing = true;
        for _ in 0..plies {
            let col = random_legal_move(&board, &mut rng).unwrap();
            let (row, col) = board.make_move(col, player);
            if game_state(&board, row, col, 4, player) != GameState::Ongoing {
                ongoing = false;
                break;
            }
            player = player.opponent();
        }
        if ongoing {
            return (board, player);
        }
    }
}

fn minimax(player: Player, depth: u32) -> MinimaxEngine {
    MinimaxEngine::new(EngineConfig::new(player, 4, 5000), depth).with_pacing(Pacing::Immediate)
}

fn monte_carlo(player: Player, timeout_ms: u64, seed: u64) -> MonteCarloEngine {
    MonteCarloEngine::with_seed(EngineConfig::new(player, 4, timeout_ms), seed)
}

// =============================================================================
// Board restoration and legality
// =============================================================================

#[test]
fn test_minimax_restores_board_and_plays_legal_moves() {
    for seed in 0..20 {
        let (mut board, player) = random_position(seed, (seed as usize * 3) % 30);
        let before = board.clone();
        let col = minimax(player, 3).choose_move(&mut board);
        assert_eq!(board, before, "seed {seed}: board not restored");
        assert!(board.can_make_move(col), "seed {seed}: illegal column {col}");
    }
}

#[test]
fn test_monte_carlo_restores_board_and_plays_legal_moves() {
    for seed in 0..10 {
        let (mut board, player) = random_position(seed, 2 + (seed as usize * 3) % 30);
        let before = board.clone();
        let col = monte_carlo(player, 15, seed).choose_move(&mut board);
        assert_eq!(board, before, "seed {seed}: board not restored");
        assert!(board.can_make_move(col), "seed {seed}: illegal column {col}");
    }
}

#[test]
fn test_monte_carlo_never_picks_full_columns() {
    // Columns 0, 1, 3, 5 and 6 are full; only 2 and 4 remain.
    let mut board = Board::from_rows(&[
        "XO.X.XO",
        "OX.O.OX",
        "XOXOOXO",
        "OXOXXOX",
        "XOXOOXO",
        "OXOXXOX",
    ])
    .unwrap();
    let mut engine = monte_carlo(Player::One, 20, 5);
    for _ in 0..5 {
        let col = engine.choose_move(&mut board);
        assert!(col == 2 || col == 4, "picked full column {col}");
    }
}

// =============================================================================
// Tactical priority
// =============================================================================

#[test]
fn test_minimax_immediate_win_beats_block() {
    // Column 3 completes a row for player one; column 5 completes a column for player two.
    let mut board = Board::from_rows(&[
        ".......",
        ".......",
        ".......",
        ".....O.",
        ".....O.",
        "XXX..O.",
    ])
    .unwrap();
    assert_eq!(minimax(Player::One, 1).choose_move(&mut board), 3);
}

#[test]
fn test_minimax_blocks_only_threat() {
    let mut board = Board::from_rows(&[
        ".......",
        ".......",
        ".......",
        ".....O.",
        ".....O.",
        "X.X..OX",
    ])
    .unwrap();
    assert_eq!(minimax(Player::One, 1).choose_move(&mut board), 5);
}

#[test]
fn test_minimax_depth_zero_is_legal() {
    let (mut board, player) = setup_position(7, 6, &[3, 3, 2, 4]).unwrap();
    let col = minimax(player, 0).choose_move(&mut board);
    assert!(board.can_make_move(col));
}

// =============================================================================
// Heuristic symmetry
// =============================================================================

quickcheck! {
    fn prop_heuristic_is_mirror_symmetric(seed: u64, plies: u8) -> bool {
        let (board, _) = random_position(seed, plies as usize % 25);
        let mirror = board.mirrored();
        [Player::One, Player::Two].iter().all(|&me| {
            heuristic(&board, me, GameState::Ongoing, me)
                == heuristic(&mirror, me, GameState::Ongoing, me)
        })
    }
}

#[test]
fn test_root_scores_mirror_with_the_board() {
    for seed in 0..8 {
        let (mut board, player) = random_position(100 + seed, 6 + seed as usize);
        let mut mirror = board.mirrored();
        let engine = minimax(player, 2);

        let scores = engine.root_scores(&mut board);
        let mut mirrored_scores = engine.root_scores(&mut mirror);
        mirrored_scores.reverse();
        assert_eq!(scores, mirrored_scores, "seed {seed}");
    }
}

#[test]
fn test_unique_best_move_mirrors() {
    let (mut board, player) = setup_position(7, 6, &[0, 1, 0]).unwrap();
    let engine = minimax(player, 2);
    let scores = engine.root_scores(&mut board);
    let best = scores.iter().flatten().max().copied().unwrap();
    let best_cols: Vec<usize> = (0..7).filter(|&c| scores[c] == Some(best)).collect();

    if let &[only] = best_cols.as_slice() {
        let mut mirror = board.mirrored();
        let col = minimax(player, 2).choose_move(&mut board);
        let mirrored_col = minimax(player, 2).choose_move(&mut mirror);
        assert_eq!(col, only);
        assert_eq!(mirrored_col, 6 - only);
    }
}

// =============================================================================
// Opening and timing
// =============================================================================

#[test]
fn test_monte_carlo_opening_is_instant() {
    let mut board = Board::new(7, 6);
    let mut engine = monte_carlo(Player::One, 5000, 1);
    let start = Instant::now();
    assert_eq!(engine.choose_move(&mut board), 3);
    assert!(start.elapsed() < Duration::from_millis(1000));

    let mut wide = Board::new(9, 7);
    assert_eq!(monte_carlo(Player::Two, 5000, 1).choose_move(&mut wide), 4);
}

#[test]
fn test_monte_carlo_respects_budget() {
    let (mut board, player) = setup_position(7, 6, &[3, 3]).unwrap();
    let mut engine = monte_carlo(player, 40, 9);
    let start = Instant::now();
    engine.choose_move(&mut board);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(40));
    assert!(elapsed < Duration::from_millis(1000), "took {elapsed:?}");
}

#[test]
fn test_minimax_pacing_fills_budget() {
    let (mut board, player) = setup_position(7, 6, &[3, 3]).unwrap();
    let config = EngineConfig::new(player, 4, 60);

    let mut paced = MinimaxEngine::new(config.clone(), 2);
    let start = Instant::now();
    paced.choose_move(&mut board);
    assert!(start.elapsed() >= Duration::from_millis(60));

    let mut eager = MinimaxEngine::new(config, 1).with_pacing(Pacing::Immediate);
    let start = Instant::now();
    eager.choose_move(&mut board);
    assert!(start.elapsed() < Duration::from_millis(60));
}

#[test]
fn test_minimax_deadline_still_returns_legal_move() {
    let (mut board, player) = setup_position(7, 6, &[3, 2]).unwrap();
    let before = board.clone();
    let mut engine =
        MinimaxEngine::new(EngineConfig::new(player, 4, 1), 6).with_pacing(Pacing::Immediate);
    let col = engine.choose_move(&mut board);
    assert!(board.can_make_move(col));
    assert_eq!(board, before);
}

// =============================================================================
// Full games
// =============================================================================

#[test]
fn test_minimax_beats_random() {
    let mut wins = 0;
    for seed in 0..5 {
        let mut one = minimax(Player::One, 3);
        let mut two = RandomEngine::with_seed(Player::Two, seed);
        let record = play_game(&mut one, &mut two, Rules::default()).unwrap();
        if record.result == GameResult::Winner(Player::One) {
            wins += 1;
        }
    }
    assert!(wins >= 4, "minimax won only {wins} of 5 games");
}

#[test]
fn test_monte_carlo_beats_random() {
    let mut wins = 0;
    for seed in 0..3 {
        let mut one = RandomEngine::with_seed(Player::One, seed);
        let mut two = monte_carlo(Player::Two, 25, seed);
        let record = play_game(&mut one, &mut two, Rules::default()).unwrap();
        if record.result == GameResult::Winner(Player::Two) {
            wins += 1;
        }
    }
    assert!(wins >= 2, "monte carlo won only {wins} of 3 games");
}

#[test]
fn test_engines_play_each_other_on_odd_boards() {
    let rules = Rules {
        width: 5,
        height: 4,
        win_length: 3,
    };
    let mut one = MonteCarloEngine::with_seed(EngineConfig::new(Player::One, 3, 10), 4);
    let mut two =
        MinimaxEngine::new(EngineConfig::new(Player::Two, 3, 10), 2).with_pacing(Pacing::Immediate);
    let record = play_game(&mut one, &mut two, rules).unwrap();
    assert!(!record.moves.is_empty());
}

#[test]
fn test_independent_engines_run_in_parallel() {
    fn assert_send<T: Send>() {}
    assert_send::<MinimaxEngine>();
    assert_send::<MonteCarloEngine>();

    let results: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                s.spawn(move || {
                    let (mut board, player) = random_position(seed, 5);
                    monte_carlo(player, 10, seed).choose_move(&mut board)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results.len(), 4);
}

/// Longer thinking time should not make Monte Carlo weaker against a random
/// opponent. Statistical, so it is slow and ignored by default.
#[test]
#[ignore]
fn test_monte_carlo_win_rate_grows_with_budget() {
    let win_rate = |timeout_ms: u64| {
        let games = 20;
        let mut wins = 0;
        for seed in 0..games {
            let mut one = monte_carlo(Player::One, timeout_ms, seed);
            let mut two = RandomEngine::with_seed(Player::Two, 1000 + seed);
            let record = play_game(&mut one, &mut two, Rules::default()).unwrap();
            if record.result == GameResult::Winner(Player::One) {
                wins += 1;
            }
        }
        wins as f64 / games as f64
    };

    let short = win_rate(2);
    let long = win_rate(50);
    assert!(long + 0.1 >= short, "short budget {short}, long budget {long}");
}
