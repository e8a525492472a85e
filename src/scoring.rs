//! Scoring. Every seat starts in debt for the full catalog and pays it off
//! square by square; finishing the catalog earns a bonus, finishing it with
//! the monomino earns a little more.

use crate::board::Player;
use crate::pieces::{catalog_square_total, PieceId};

/// Awarded when a seat has placed all 20 pieces.
pub const ALL_PIECES_BONUS: i32 = 15;
/// Awarded on top when the final placed piece is the monomino.
pub const MONOMINO_BONUS: i32 = 5;

/// Per-seat running scores.
#[derive(Clone, Debug)]
pub struct ScoreBoard {
    scores: Vec<i32>,
    initialized: bool,
}

impl ScoreBoard {
    pub fn new(seats: usize) -> Self {
        let mut scores = ScoreBoard { scores: vec![0; seats], initialized: false };
        scores.initialize();
        scores
    }

    fn baseline() -> i32 {
        -(catalog_square_total() as i32)
    }

    /// One-time baseline setup. Calling this again is a no-op, so a repeat
    /// initialization can never wipe out an in-progress game's score.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.scores.fill(Self::baseline());
        self.initialized = true;
    }

    /// Credits a successful placement. `completed_catalog` is whether the
    /// seat's used-piece set now equals the full catalog.
    pub fn record_placement(&mut self, player: Player, piece: PieceId, completed_catalog: bool) {
        self.initialize();
        self.scores[player.index()] += piece.square_count() as i32;

        if completed_catalog {
            self.scores[player.index()] += ALL_PIECES_BONUS;
            if piece == PieceId::I1 {
                self.scores[player.index()] += MONOMINO_BONUS;
            }
        }
    }

    pub fn score(&self, player: Player) -> i32 {
        self.scores[player.index()]
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    /// New-game reset. Unlike [`initialize`](Self::initialize), this always
    /// re-baselines.
    pub fn reset(&mut self) {
        self.initialized = false;
        self.initialize();
    }
}
