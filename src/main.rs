//! Dropline: pit connect-N engines against each other.
//!
//! ## Usage
//!
//! - `dropline` - Show a demo game
//! - `dropline play --one minimax --two monte-carlo` - Play a series of games
//! - `dropline demo` - Play one minimax vs Monte Carlo game, printing every move

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dropline::board::Player;
use dropline::constants::{
    DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_TIMEOUT_MS, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH,
};
use dropline::engine::{EngineConfig, MoveSelector};
use dropline::game::{GameResult, Rules, play_game, play_game_with};
use dropline::minimax::{MinimaxEngine, Pacing};
use dropline::monte_carlo::MonteCarloEngine;
use dropline::random::RandomEngine;

/// Dropline: minimax and Monte Carlo engines for connect-N
#[derive(Parser)]
#[command(name = "dropline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of games between two engines and report the score
    Play(PlayArgs),
    /// Play one minimax vs Monte Carlo game, printing the board after each move
    Demo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Minimax,
    MonteCarlo,
    Random,
}

#[derive(Args)]
struct PlayArgs {
    /// Engine moving first
    #[arg(long, value_enum, default_value_t = EngineKind::Minimax)]
    one: EngineKind,

    /// Engine moving second
    #[arg(long, value_enum, default_value_t = EngineKind::MonteCarlo)]
    two: EngineKind,

    /// How many games to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Minimax search depth
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Time budget per move in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Board width in columns
    #[arg(
        long,
        default_value_t = DEFAULT_WIDTH as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    width: u16,

    /// Board height in rows
    #[arg(
        long,
        default_value_t = DEFAULT_HEIGHT as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    height: u16,

    /// Pieces in a line needed to win
    #[arg(
        long,
        default_value_t = DEFAULT_WIN_LENGTH as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    win_length: u16,

    /// RNG seed for the randomized engines
    #[arg(long)]
    seed: Option<u64>,

    /// Let minimax return as soon as its search ends instead of using its full budget
    #[arg(long, default_value_t = false)]
    no_pacing: bool,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    draws: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.log_level);

    match cli.command {
        Some(Commands::Play(args)) => run_series(&args),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn build_engine(
    kind: EngineKind,
    player: Player,
    args: &PlayArgs,
    seed: u64,
) -> Box<dyn MoveSelector> {
    let config = EngineConfig::new(player, args.win_length as usize, args.timeout_ms);
    match kind {
        EngineKind::Minimax => {
            let pacing = if args.no_pacing { Pacing::Immediate } else { Pacing::FillBudget };
            let engine = MinimaxEngine::new(config, args.depth).with_pacing(pacing);
            debug!(%player, depth = engine.depth(), ?pacing, "minimax engine ready");
            Box::new(engine)
        }
        EngineKind::MonteCarlo => Box::new(MonteCarloEngine::with_seed(config, seed)),
        EngineKind::Random => Box::new(RandomEngine::with_seed(player, seed)),
    }
}

fn run_series(args: &PlayArgs) -> anyhow::Result<()> {
    let rules = Rules {
        width: args.width as usize,
        height: args.height as usize,
        win_length: args.win_length as usize,
    };
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    info!(seed, ?rules, "starting series");

    let mut one = build_engine(args.one, Player::One, args, seed);
    let mut two = build_engine(args.two, Player::Two, args, seed.wrapping_add(1));
    let mut score = MatchScore::default();

    for game_idx in 0..args.games {
        let record = play_game(one.as_mut(), two.as_mut(), rules)?;
        match record.result {
            GameResult::Winner(Player::One) => score.wins[0] += 1,
            GameResult::Winner(Player::Two) => score.wins[1] += 1,
            GameResult::Draw => score.draws += 1,
        }
        info!(
            game = game_idx + 1,
            result = ?record.result,
            moves = record.moves.len(),
            "game finished"
        );
    }

    println!(
        "{} (first): {} wins, {} (second): {} wins, {} draws",
        one.name(),
        score.wins[0],
        two.name(),
        score.wins[1],
        score.draws
    );
    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    println!("Dropline: minimax (X) vs Monte Carlo (O)\n");

    let rules = Rules::default();
    let mut minimax = MinimaxEngine::new(EngineConfig::new(Player::One, rules.win_length, 200), 4)
        .with_pacing(Pacing::Immediate);
    let mut monte_carlo = MonteCarloEngine::new(
        EngineConfig::new(Player::Two, rules.win_length, 200),
        fastrand::Rng::new(),
    );

    let record = play_game_with(&mut minimax, &mut monte_carlo, rules, |board, col| {
        println!("played column {col}");
        println!("{board}");
    })?;

    match record.result {
        GameResult::Winner(player) => println!("{player} wins after {} moves", record.moves.len()),
        GameResult::Draw => println!("draw after {} moves", record.moves.len()),
    }
    Ok(())
}
