mod report;
mod view;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chess_core::{FenParser, Move, PieceKind};
use chess_engine::{movegen, Board, Controller, RulesConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use report::{MovesReport, PerftReport, StateReport};
use view::TerminalView;

#[derive(Parser)]
#[command(name = "chess-rules")]
#[command(about = "Inspect positions with the chess rules engine")]
struct Cli {
    /// Position to start from
    #[arg(long, global = true, default_value = FenParser::STARTPOS)]
    fen: String,
    /// Rules configuration file (defaults to ./chess-rules.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the legal moves of the side to move
    Moves,
    /// Count leaf nodes to the given depth
    Perft {
        depth: u32,
        /// Show the node count below each root move
        #[arg(short, long)]
        divide: bool,
        /// Search root moves in parallel
        #[arg(short, long)]
        parallel: bool,
    },
    /// Show check, mate and draw status
    State,
    /// Play moves such as e2e4 or e7e8n and show the resulting position
    Play {
        #[arg(required = true)]
        moves: Vec<String>,
        /// Claim a draw once the moves are played
        #[arg(long)]
        claim_draw: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rules(path: Option<&PathBuf>) -> Result<RulesConfig> {
    match path {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => RulesConfig::load_default().context("failed to load chess-rules.toml"),
    }
}

/// Splits "e7e8q" into the move and its promotion piece.
fn parse_move(text: &str) -> Result<(Move, Option<PieceKind>)> {
    let (squares, suffix) = if text.len() == 5 && text.is_ascii() {
        text.split_at(4)
    } else {
        (text, "")
    };
    let mv: Move = squares.parse()?;
    let promotion = match suffix.chars().next() {
        None => None,
        Some(c) => match PieceKind::from_promotion_char(c) {
            Some(kind) => Some(kind),
            None => bail!("invalid promotion piece '{c}' in {text}"),
        },
    };
    Ok((mv, promotion))
}

fn print<T: serde::Serialize + std::fmt::Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rules = load_rules(cli.config.as_ref())?;
    tracing::debug!(?rules, "rules loaded");
    let board = Board::from_fen_with_rules(&cli.fen, rules)
        .with_context(|| format!("invalid FEN: {}", cli.fen))?;

    match cli.command {
        Commands::Moves => {
            let moves = movegen::legal_moves(&board);
            print(&MovesReport::new(&board, &moves), cli.json)?;
        }
        Commands::Perft {
            depth,
            divide,
            parallel,
        } => {
            let start = Instant::now();
            let report = if divide {
                PerftReport::divided(depth, chess_engine::perft_divide(&board, depth))
            } else if parallel {
                PerftReport::total(depth, chess_engine::perft_par(&board, depth))
            } else {
                PerftReport::total(depth, chess_engine::perft(&board, depth))
            };
            tracing::info!(depth, elapsed_ms = start.elapsed().as_millis() as u64, "perft done");
            print(&report.timed(start.elapsed()), cli.json)?;
        }
        Commands::State => {
            print(&StateReport::new(&board), cli.json)?;
        }
        Commands::Play { moves, claim_draw } => {
            let mut game = Controller::with_rules(TerminalView::new(!cli.json), rules);
            game.load_position(&cli.fen)?;

            for text in &moves {
                let (mv, promotion) = parse_move(text)?;
                game.view_mut().set_promotion(promotion);
                if !game.attempt_move(mv.from(), mv.to())? {
                    bail!("illegal move {text} in {}", game.board().to_fen());
                }
            }
            if claim_draw {
                let reason = game.claim_draw()?;
                tracing::info!(%reason, "draw claimed");
            }
            print(&StateReport::new(game.board()), cli.json)?;
        }
    }

    Ok(())
}
