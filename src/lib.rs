//! # Blokus Duo Engine
//!
//! A rules engine and move search for two-player Blokus on a 14x14 board.
//! Players place polyomino pieces from a shared catalog; same-color pieces
//! may touch only at corners, first moves must cover the seat's starting
//! cell, and the game ends when no seat can place any remaining piece.
//!
//! ## Layout
//! - [`pieces`]: the 20-piece catalog, orientation transforms, square counts
//! - [`board`]: cell ownership grid, used-piece records, starting cells
//! - [`rules`]: move legality with typed rejection reasons
//! - [`scoring`]: debt-baseline scores and completion bonuses
//! - [`search`]: exact existence check and the heuristic AI selector
//! - [`session`]: the turn state machine and the public game surface
//!
//! ## Usage
//! ```no_run
//! use blokus::{GameConfig, GameSession};
//!
//! let mut session = GameSession::with_seed(GameConfig::duo(), 42);
//! while !session.is_game_over() {
//!     let player = session.current_player();
//!     let mv = session
//!         .select_move(player)
//!         .or_else(|| session.first_legal_move(player))
//!         .expect("the seat holding the turn always has a move");
//!     session.submit_move(mv).expect("selected moves are legal");
//! }
//! ```

pub mod board;
pub mod pieces;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod session;

pub use board::{Board, Cell, GameConfig, Player, BOARD_SIZE};
pub use pieces::{Orientation, PieceId, Rotation, Shape};
pub use rules::{Move, RuleViolation};
pub use scoring::ScoreBoard;
pub use session::{
    GameObserver, GameSession, GameStatus, MoveHistoryEntry, MoveRejection, PlacementReport,
};
