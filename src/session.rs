//! # Game Session - Central Game State Management
//!
//! The `GameSession` is the single source of truth for one game. It owns the
//! board, the score board, the move history, and the RNG used by the
//! automated player, and every move goes through it:
//!
//! - submitted moves are validated before anything mutates, so a rejected
//!   move leaves no trace;
//! - after a successful placement the session advances the turn, skipping
//!   seats with no legal move anywhere and ending the game when no seat can
//!   move;
//! - presentation layers hook in through [`GameObserver`] and never hold
//!   game state of their own.
//!
//! There are no globals; multiple sessions can run side by side.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::time::SystemTime;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, GameConfig, Player};
use crate::pieces::{oriented_shape, PieceId};
use crate::rules::{self, Move, RuleViolation};
use crate::scoring::ScoreBoard;
use crate::search;

/// Why a submitted move was rejected. All of these are expected outcomes
/// the caller handles by trying another move or yielding the turn; none
/// mutate the session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveRejection {
    /// The placement violates a board rule.
    Rule(RuleViolation),
    /// The piece was already placed, by the named seat. Pieces come from a
    /// shared pool, so a placement by either seat spends the identifier.
    PieceAlreadyUsed { by: Player },
    /// The move was submitted for a seat that does not hold the turn.
    WrongPlayerTurn { expected: Player },
    /// The game has ended; no further moves are accepted.
    GameAlreadyOver,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::Rule(violation) => write!(f, "{}", violation),
            MoveRejection::PieceAlreadyUsed { by } => {
                write!(f, "piece was already placed by {}", by)
            }
            MoveRejection::WrongPlayerTurn { expected } => {
                write!(f, "it is {}'s turn", expected)
            }
            MoveRejection::GameAlreadyOver => write!(f, "the game is over"),
        }
    }
}

impl Error for MoveRejection {}

impl From<RuleViolation> for MoveRejection {
    fn from(violation: RuleViolation) -> Self {
        MoveRejection::Rule(violation)
    }
}

/// Current session status. `Over` is terminal: scores are frozen and no
/// move is accepted afterwards.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    Over,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::Over)
    }
}

/// A single entry in the move history.
#[derive(Clone, Debug)]
pub struct MoveHistoryEntry {
    /// When the move was made.
    pub timestamp: SystemTime,
    /// The move that was made.
    pub mv: Move,
    /// Move number (1-indexed).
    pub move_number: usize,
}

/// What happened after a move was accepted.
#[derive(Clone, Debug)]
pub struct PlacementReport {
    /// The applied move.
    pub mv: Move,
    /// Seats that were skipped because they had no legal move anywhere.
    pub skipped: Vec<Player>,
    /// The seat now holding the turn, or `None` when the game ended.
    pub next_player: Option<Player>,
    /// Whether the game is now over.
    pub game_over: bool,
    /// Winner by score when the game is over; `None` for a draw.
    pub winner: Option<Player>,
}

/// Presentation callbacks. All methods default to no-ops so a headless
/// caller can ignore the ones it does not care about.
pub trait GameObserver {
    fn score_changed(&mut self, _scores: &[i32]) {}
    fn turn_changed(&mut self, _player: Player) {}
    fn game_over(&mut self, _scores: &[i32]) {}
}

/// One game of two-seat (or up to four-seat) Blokus.
pub struct GameSession {
    config: GameConfig,
    board: Board,
    scores: ScoreBoard,
    status: GameStatus,
    current_player: Player,
    move_history: Vec<MoveHistoryEntry>,
    rng: Xoshiro256PlusPlus,
    observer: Option<Box<dyn GameObserver>>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::from_entropy())
    }

    /// A session whose automated play is reproducible under a fixed seed.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: Xoshiro256PlusPlus) -> Self {
        let board = Board::new(&config);
        let scores = ScoreBoard::new(config.seats);
        GameSession {
            config,
            board,
            scores,
            status: GameStatus::InProgress,
            current_player: Player(0),
            move_history: Vec::new(),
            rng,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn GameObserver, &ScoreBoard)) {
        if let Some(observer) = self.observer.as_mut() {
            f(observer.as_mut(), &self.scores);
        }
    }

    /// Validates and applies one move, then advances the turn.
    ///
    /// Every precondition is checked before any state changes, so a
    /// rejection is always side-effect free and partial placement is never
    /// observable.
    pub fn submit_move(&mut self, mv: Move) -> Result<PlacementReport, MoveRejection> {
        if self.status.is_game_over() {
            return Err(MoveRejection::GameAlreadyOver);
        }
        if mv.player != self.current_player {
            return Err(MoveRejection::WrongPlayerTurn { expected: self.current_player });
        }
        if let Some(by) = self.board.piece_used_by(mv.piece) {
            return Err(MoveRejection::PieceAlreadyUsed { by });
        }

        let shape = oriented_shape(mv.piece, mv.orientation);
        rules::check_move(&self.board, &shape, mv.anchor, mv.player)?;

        // Commit. The footprint passed the bounds check, so the casts are
        // exact.
        let cells: Vec<(usize, usize)> = rules::footprint(&shape, mv.anchor)
            .into_iter()
            .map(|(r, c)| (r as usize, c as usize))
            .collect();
        self.board.place(mv.player, mv.piece, &cells);

        let completed = self.board.used_pieces(mv.player).len() == PieceId::ALL.len();
        self.scores.record_placement(mv.player, mv.piece, completed);

        self.move_history.push(MoveHistoryEntry {
            timestamp: SystemTime::now(),
            mv,
            move_number: self.move_history.len() + 1,
        });

        self.notify(|observer, scores| observer.score_changed(scores.scores()));

        let (skipped, next_player) = self.advance_turn();
        let game_over = self.status.is_game_over();
        Ok(PlacementReport {
            mv,
            skipped,
            next_player,
            game_over,
            winner: if game_over { self.winner() } else { None },
        })
    }

    /// Hands the turn to the next seat that has a legal move anywhere on
    /// the board. Seats without one are skipped; when the scan comes up
    /// empty for everyone the game is over.
    fn advance_turn(&mut self) -> (Vec<Player>, Option<Player>) {
        let seats = self.config.seats;
        let mut skipped = Vec::new();

        for step in 1..=seats {
            let candidate = Player(((self.current_player.index() + step) % seats) as u8);
            if search::has_any_legal_move(&self.board, candidate) {
                self.current_player = candidate;
                self.notify(|observer, _| observer.turn_changed(candidate));
                return (skipped, Some(candidate));
            }
            skipped.push(candidate);
        }

        self.status = GameStatus::Over;
        self.notify(|observer, scores| observer.game_over(scores.scores()));
        (skipped, None)
    }

    /// Exact existence check, the sole basis for skip and game-over
    /// decisions.
    pub fn has_any_legal_move(&self, player: Player) -> bool {
        search::has_any_legal_move(&self.board, player)
    }

    /// Heuristic move choice for an automated seat. `None` here does not
    /// prove the seat is stuck; see [`first_legal_move`](Self::first_legal_move).
    pub fn select_move(&mut self, player: Player) -> Option<Move> {
        search::select_move(&self.board, player, &mut self.rng)
    }

    /// Exhaustive fallback for automated play when the bounded heuristic
    /// finds nothing even though the seat holds the turn.
    pub fn first_legal_move(&self, player: Player) -> Option<Move> {
        search::first_legal_move(&self.board, player)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn score(&self, player: Player) -> i32 {
        self.scores.score(player)
    }

    pub fn scores(&self) -> &[i32] {
        self.scores.scores()
    }

    pub fn used_pieces(&self, player: Player) -> &BTreeSet<PieceId> {
        self.board.used_pieces(player)
    }

    /// Catalog pieces still in the shared pool.
    pub fn remaining_pieces(&self) -> Vec<PieceId> {
        self.board.unused_pieces()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Winner by score once the game is over. `None` while in progress or
    /// on a drawn final position.
    pub fn winner(&self) -> Option<Player> {
        if !self.status.is_game_over() {
            return None;
        }
        let scores = self.scores.scores();
        let best = *scores.iter().max()?;
        let mut leaders = scores.iter().enumerate().filter(|(_, &s)| s == best);
        let (seat, _) = leaders.next()?;
        if leaders.next().is_some() {
            None
        } else {
            Some(Player(seat as u8))
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only board view for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Starts a fresh game: empty board, baseline scores, seat one to move.
    pub fn reset(&mut self) {
        self.board.reset();
        self.scores.reset();
        self.move_history.clear();
        self.status = GameStatus::InProgress;
        self.current_player = Player(0);
        self.notify(|observer, scores| observer.score_changed(scores.scores()));
        self.notify(|observer, _| observer.turn_changed(Player(0)));
    }

    /// Formats the move history as plain text.
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::from("=== Blokus Duo Game History ===\n\n");
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {} {} at ({},{})\n",
                entry.move_number,
                entry.mv.player,
                entry.mv.piece,
                entry.mv.orientation,
                entry.mv.anchor.0,
                entry.mv.anchor.1
            ));
        }

        if self.status.is_game_over() {
            match self.winner() {
                Some(winner) => output.push_str(&format!("\nResult: {} wins!\n", winner)),
                None => output.push_str("\nResult: Draw\n"),
            }
        } else {
            output.push_str(&format!("\n(Game in progress - {} to move)\n", self.current_player));
        }

        output
    }
}
