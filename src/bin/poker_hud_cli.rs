// src/bin/poker_hud_cli.rs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use poker_hud::api::{build_seat_summaries, cards_from_tokens, Command, Session, StatusDocument};
use poker_hud::config::HudConfig;
use poker_hud::domain::chips::Chips;
use poker_hud::engine::{PlayerActionKind, RandomSource};
use poker_hud::eval::{describe_hand, estimate_equity, estimate_equity_parallel, evaluate};
use poker_hud::infra::SessionRng;

#[derive(Parser, Debug)]
#[command(name = "poker_hud_cli", version, about = "Dev CLI for the poker HUD core", long_about = None)]
struct Cli {
    /// Path to the TOML config (created with defaults when missing)
    #[arg(short, long, default_value = "hud.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate equity of one hand against random opponents
    Equity {
        /// Two hole cards ("16,14", "SA", "1614", ...)
        #[arg(long, num_args = 2, required = true)]
        hole: Vec<String>,

        /// Board cards (0, 3, 4 or 5)
        #[arg(long, num_args = 0..=5)]
        board: Vec<String>,

        #[arg(short, long, default_value_t = 1)]
        opponents: usize,

        /// Overrides equity_trials from the config
        #[arg(short, long)]
        trials: Option<usize>,
    },
    /// Load a status document and print a summary
    Show {
        /// Status document path (defaults to autosave_path)
        path: Option<PathBuf>,
    },
    /// Play the 3-way all-in scenario and export the result
    Demo {
        /// Where to write the status document (defaults to autosave_path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = HudConfig::load_or_create(&cli.config)
        .with_context(|| format!("loading config '{}'", cli.config.display()))?;

    match cli.command {
        Commands::Equity {
            hole,
            board,
            opponents,
            trials,
        } => run_equity(&config, &hole, &board, opponents, trials),
        Commands::Show { path } => run_show(config, path),
        Commands::Demo { out } => run_demo(config, out),
    }
}

fn run_equity(
    config: &HudConfig,
    hole: &[String],
    board: &[String],
    opponents: usize,
    trials: Option<usize>,
) -> Result<()> {
    let hole = cards_from_tokens(hole).context("parsing hole cards")?;
    let board = cards_from_tokens(board).context("parsing board")?;
    if ![0, 3, 4, 5].contains(&board.len()) {
        bail!("board must have 0, 3, 4 or 5 cards, got {}", board.len());
    }

    let trials = trials.unwrap_or(config.equity_trials);
    let mut rng = SessionRng::new(config.rng_seed);
    let equity = if config.parallel_equity {
        let seed = config.rng_seed.unwrap_or_else(|| rng.next_seed());
        estimate_equity_parallel(&hole, &board, opponents, trials, config.equity_workers, seed)
    } else {
        estimate_equity(&hole, &board, opponents, trials, &mut rng)
    };

    let shown: Vec<String> = hole.iter().map(ToString::to_string).collect();
    println!(
        "{} vs {opponents} opponent(s), {trials} trials: {equity:.1}%",
        shown.join(" ")
    );
    if board.len() == 5 {
        let rank = evaluate(&hole, &board).context("evaluating hand")?;
        println!("made hand: {}", describe_hand(rank));
    }
    Ok(())
}

fn run_show(config: HudConfig, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| config.autosave_path.clone());
    let mut session = Session::new(config);
    let dropped = session
        .load(&path)
        .with_context(|| format!("loading status '{}'", path.display()))?;

    for err in &dropped {
        println!("dropped: {err}");
    }
    print_document(&session.export_document());

    for seat in build_seat_summaries(&session.current_state()) {
        let marker = if seat.to_act { "*" } else { " " };
        println!(
            "{marker} seat {} {:<10} {:>3} stack {:>6} bet {:>5} {}",
            seat.seat, seat.name, seat.position, seat.stack.0, seat.current_bet.0, seat.action
        );
    }
    Ok(())
}

fn run_demo(config: HudConfig, out: Option<PathBuf>) -> Result<()> {
    let out = out.unwrap_or_else(|| config.autosave_path.clone());
    let mut session = Session::new(config);

    session.apply(Command::SetPlayerCount { count: 3 })?;
    for (seat, stack) in [(0u8, 100u64), (1, 50), (2, 30)] {
        session.apply(Command::SetStack {
            seat,
            amount: Chips(stack),
        })?;
    }
    for _ in 0..3 {
        let response = session.apply(Command::Action(PlayerActionKind::AllIn))?;
        info!("all-in: {response:?}");
    }

    print_document(&session.export_document());
    session
        .export_to(&out)
        .with_context(|| format!("writing status '{}'", out.display()))?;
    println!("status written to {}", out.display());
    Ok(())
}

fn print_document(doc: &StatusDocument) {
    let board = &doc.board;
    println!(
        "street {} | blinds {} | board [{}]",
        board.street,
        board.blinds,
        board.cards.join(" ")
    );
    println!("pot {} (main {})", board.pot, board.main_pot);
    for (i, side) in board.side_pots.iter().enumerate() {
        println!("  side pot {}: {} {:?}", i + 1, side.amount, side.players);
    }
}
