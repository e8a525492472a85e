//! # Blokus Duo Terminal Front End
//!
//! Line-oriented driver for the engine: renders the board with terminal
//! colors, reads human moves from stdin, and paces the automated player.
//! All rules live in the library; this binary validates nothing and
//! displays everything.
//!
//! ## Usage
//! Run with `cargo run --release`. Human moves are entered as
//! `<piece> <rotation>[m] <row> <col>`, for example `L5 90m 3 4` for the
//! L-pentomino rotated a quarter turn, mirrored, anchored at row 3, col 4.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::{Color, Colorize};

use blokus::{
    GameConfig, GameObserver, GameSession, Move, Orientation, PieceId, Player, PlacementReport,
    Rotation,
};

#[derive(Parser)]
#[command(name = "play", about = "Play Blokus Duo in the terminal")]
struct Args {
    /// Who controls each seat
    #[arg(long, value_enum, default_value_t = Mode::HumanVsAi)]
    mode: Mode,

    /// RNG seed for reproducible automated games
    #[arg(long)]
    seed: Option<u64>,

    /// Pacing delay before an automated move, in milliseconds
    #[arg(long, default_value_t = 600)]
    ai_delay_ms: u64,

    /// Worker threads for the exhaustive move search (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Two humans sharing the terminal
    Pvp,
    /// Human in seat one, AI in seat two
    HumanVsAi,
    /// Watch two automated players
    AiVsAi,
}

impl Mode {
    fn is_automated(self, player: Player) -> bool {
        match self {
            Mode::Pvp => false,
            Mode::HumanVsAi => player.index() == 1,
            Mode::AiVsAi => true,
        }
    }
}

fn seat_color(player: Player) -> Color {
    match player.index() {
        0 => Color::Red,
        1 => Color::Blue,
        2 => Color::Green,
        _ => Color::Yellow,
    }
}

/// Prints turn and game-over transitions as they happen.
struct ConsoleObserver;

impl GameObserver for ConsoleObserver {
    fn turn_changed(&mut self, player: Player) {
        println!("{}", format!("{} to move", player).color(seat_color(player)).bold());
    }

    fn game_over(&mut self, scores: &[i32]) {
        println!("{}", "Game over! No player can place another piece.".bold());
        for (seat, score) in scores.iter().enumerate() {
            let player = Player(seat as u8);
            println!("  {}: {}", player.to_string().color(seat_color(player)), score);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let threads = if args.threads == 0 { num_cpus::get() } else { args.threads };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("failed to build the search thread pool")?;

    let config = GameConfig::duo();
    let mut session = match args.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    };
    session.set_observer(Box::new(ConsoleObserver));

    println!("{}", "Blokus Duo".bold());
    println!("Type 'help' for commands.\n");
    print_board(&session);

    while !session.is_game_over() {
        let player = session.current_player();

        let report = if args.mode.is_automated(player) {
            thread::sleep(Duration::from_millis(args.ai_delay_ms));
            automated_move(&mut session, player)?
        } else {
            match human_move(&mut session, player)? {
                Some(report) => report,
                None => return Ok(()),
            }
        };

        if !report.game_over {
            for &seat in &report.skipped {
                println!("{}", format!("{} has no legal move and is skipped", seat).italic());
            }
        }
        print_board(&session);
        print_scores(&session);
    }

    match session.winner() {
        Some(winner) => {
            println!("{}", format!("{} wins!", winner).color(seat_color(winner)).bold())
        }
        None => println!("{}", "Draw!".bold()),
    }
    Ok(())
}

fn automated_move(session: &mut GameSession, player: Player) -> Result<PlacementReport> {
    // The bounded heuristic may miss; the exhaustive scan cannot, and the
    // turn controller guarantees the seat holding the turn has a move.
    let mv: Move = session
        .select_move(player)
        .or_else(|| session.first_legal_move(player))
        .ok_or_else(|| anyhow!("no legal move for the seat holding the turn"))?;

    println!("{} plays {}", player.to_string().color(seat_color(player)), mv);
    session
        .submit_move(mv)
        .map_err(|rejection| anyhow!("automated move rejected: {}", rejection))
}

/// Prompts until the player enters a legal move or a session-ending
/// command. Returns `None` when the player quits.
fn human_move(session: &mut GameSession, player: Player) -> Result<Option<PlacementReport>> {
    loop {
        print!("{} ", format!("{}>", player).color(seat_color(player)));
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let input = line.trim();

        match input {
            "" => continue,
            "help" => print_help(),
            "board" => print_board(session),
            "pieces" => print_remaining_pieces(session),
            "history" => println!("{}", session.format_history()),
            "quit" | "exit" => return Ok(None),
            _ => match parse_move(input) {
                Ok((piece, orientation, anchor)) => {
                    match session.submit_move(Move { piece, orientation, anchor, player }) {
                        Ok(report) => return Ok(Some(report)),
                        Err(rejection) => println!("{}", rejection.to_string().red()),
                    }
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
        }
    }
}

fn parse_move(input: &str) -> Result<(PieceId, Orientation, (usize, usize))> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 4 {
        bail!("expected: <piece> <rotation>[m] <row> <col>  (e.g. L5 90m 3 4)");
    }

    let piece = parts[0].parse::<PieceId>().map_err(|e| anyhow!(e))?;
    let (rotation_str, mirrored) = match parts[1]
        .strip_suffix('m')
        .or_else(|| parts[1].strip_suffix('M'))
    {
        Some(stripped) => (stripped, true),
        None => (parts[1], false),
    };
    let rotation = rotation_str.parse::<Rotation>().map_err(|e| anyhow!(e))?;
    let row: usize = parts[2].parse().context("invalid row")?;
    let col: usize = parts[3].parse().context("invalid column")?;

    Ok((piece, Orientation::new(rotation, mirrored), (row, col)))
}

fn print_help() {
    println!("Commands:");
    println!("  <piece> <rotation>[m] <row> <col>   place a piece, e.g. 'L5 90m 3 4'");
    println!("                                      rotation is 0/90/180/270, 'm' mirrors");
    println!("  pieces                              list pieces still in the pool");
    println!("  board                               redraw the board");
    println!("  history                             show the move history");
    println!("  quit                                leave the game");
}

fn print_board(session: &GameSession) {
    let board = session.board();

    print!("   ");
    for c in 0..board.size() {
        print!("{:>2}", c);
    }
    println!();

    for r in 0..board.size() {
        print!("{:>2} ", r);
        for c in 0..board.size() {
            match board.owner_at(r as i32, c as i32) {
                Some(owner) => print!("{}", " \u{25a0}".color(seat_color(owner))),
                None => {
                    let start_seat = session
                        .config()
                        .players()
                        .find(|&p| board.start_cell(p) == (r, c));
                    match start_seat {
                        Some(seat) => print!("{}", " \u{25cb}".color(seat_color(seat))),
                        None => print!("{}", " \u{00b7}".dimmed()),
                    }
                }
            }
        }
        println!();
    }
}

fn print_scores(session: &GameSession) {
    let scores: Vec<String> = session
        .config()
        .players()
        .map(|p| format!("{}: {}", p, session.score(p)).color(seat_color(p)).to_string())
        .collect();
    println!(
        "{}   ({} pieces left in the pool)\n",
        scores.join("   "),
        session.remaining_pieces().len()
    );
}

fn print_remaining_pieces(session: &GameSession) {
    let names: Vec<&str> = session.remaining_pieces().iter().map(|id| id.name()).collect();
    println!("In the pool: {}", names.join(" "));
}
