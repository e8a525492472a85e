//! Move search. Two entry points share the legality check: an exhaustive
//! scan that answers "does any legal move exist" exactly, and a bounded
//! heuristic that picks a move for the automated player.
//!
//! The exhaustive scan is the sole source of truth for skip and game-over
//! decisions. The heuristic is deliberately narrower (it never tries
//! mirrored footprints and samples a bounded candidate set), so a `None`
//! from it proves nothing about the position.

use rand::Rng;
use rayon::prelude::*;
use std::collections::HashSet;

use crate::board::{Board, Player};
use crate::pieces::{orientations, oriented_shape, Orientation, Rotation};
use crate::rules::{self, Move};

/// Chebyshev radius around own cells searched for candidate anchors. Only
/// cells this close to an own piece can satisfy the corner-contact rule
/// for the pieces in the catalog.
pub const CANDIDATE_RADIUS: i32 = 3;
/// The candidate list is topped up with random cells to at least this many
/// distinct entries.
pub const MIN_CANDIDATES: usize = 20;

/// Exhaustive existence check: every unused piece, every distinct
/// orientation, every anchor. Short-circuits on the first legal hit.
///
/// Piece-level fan-out runs on the rayon pool; the board is only read.
pub fn has_any_legal_move(board: &Board, player: Player) -> bool {
    board.unused_pieces().par_iter().any(|&id| {
        orientations(id).iter().any(|shape| {
            (0..board.size()).any(|r| {
                (0..board.size()).any(|c| rules::is_legal(board, shape, (r, c), player))
            })
        })
    })
}

/// First legal move in deterministic scan order, if any. The caller of the
/// heuristic selector falls back to this when the bounded search comes up
/// empty even though moves exist.
pub fn first_legal_move(board: &Board, player: Player) -> Option<Move> {
    for &piece in &board.unused_pieces() {
        for rotation in Rotation::ALL {
            for mirrored in [false, true] {
                let orientation = Orientation::new(rotation, mirrored);
                let shape = oriented_shape(piece, orientation);
                for r in 0..board.size() {
                    for c in 0..board.size() {
                        if rules::is_legal(board, &shape, (r, c), player) {
                            return Some(Move { piece, orientation, anchor: (r, c), player });
                        }
                    }
                }
            }
        }
    }
    None
}

/// Full enumeration of legal moves for diagnostics and tests. Symmetric
/// pieces yield duplicate footprints under distinct descriptors; callers
/// that care can dedup, correctness does not.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .unused_pieces()
        .par_iter()
        .flat_map_iter(|&piece| {
            let size = board.size();
            Rotation::ALL.into_iter().flat_map(move |rotation| {
                [false, true].into_iter().flat_map(move |mirrored| {
                    let orientation = Orientation::new(rotation, mirrored);
                    let shape = oriented_shape(piece, orientation);
                    let mut found = Vec::new();
                    for r in 0..size {
                        for c in 0..size {
                            if rules::is_legal(board, &shape, (r, c), player) {
                                found.push(Move { piece, orientation, anchor: (r, c), player });
                            }
                        }
                    }
                    found
                })
            })
        })
        .collect()
}

/// Heuristic move selection for the automated player.
///
/// Unused pieces are tried largest first; placing big pieces early keeps
/// more corner outlets open later. For each piece the candidate anchors
/// are, in order: the starting cell on a first move, empty cells within
/// [`CANDIDATE_RADIUS`] of any own cell, then random cells topped up to
/// [`MIN_CANDIDATES`] distinct entries. Each anchor is tried in the four
/// rotations only.
pub fn select_move<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Option<Move> {
    let mut pieces = board.unused_pieces();
    pieces.sort_by(|a, b| b.square_count().cmp(&a.square_count()));

    for piece in pieces {
        let candidates = candidate_cells(board, player, rng);
        for &anchor in &candidates {
            for rotation in Rotation::ALL {
                let orientation = Orientation::new(rotation, false);
                let shape = oriented_shape(piece, orientation);
                if rules::is_legal(board, &shape, anchor, player) {
                    return Some(Move { piece, orientation, anchor, player });
                }
            }
        }
    }
    None
}

/// Prioritized, deduplicated anchor candidates for one piece attempt.
fn candidate_cells<R: Rng>(board: &Board, player: Player, rng: &mut R) -> Vec<(usize, usize)> {
    fn push(
        cell: (usize, usize),
        seen: &mut HashSet<(usize, usize)>,
        candidates: &mut Vec<(usize, usize)>,
    ) {
        if seen.insert(cell) {
            candidates.push(cell);
        }
    }

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    if !board.has_placed(player) {
        push(board.start_cell(player), &mut seen, &mut candidates);
    }

    // Empty cells near own pieces; only these can produce a corner contact.
    for (r, c) in board.owned_cells(player) {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                let (nr, nc) = (r as i32 + dr, c as i32 + dc);
                if board.in_bounds(nr, nc) && board.owner_at(nr, nc).is_none() {
                    push((nr as usize, nc as usize), &mut seen, &mut candidates);
                }
            }
        }
    }

    // Random top-up so early-game and sparse positions still get breadth.
    while candidates.len() < MIN_CANDIDATES {
        let cell = (rng.gen_range(0..board.size()), rng.gen_range(0..board.size()));
        push(cell, &mut seen, &mut candidates);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameConfig;
    use crate::pieces::PieceId;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    /// Fills every cell except the ones listed. The filler belongs to
    /// player 1, so it blocks player 0 by occupancy without granting any
    /// corner contact.
    fn packed_board_except(open: &[(usize, usize)]) -> Board {
        let mut board = Board::new(&GameConfig::duo());
        let mut filler: Vec<(usize, usize)> = Vec::new();
        for r in 0..board.size() {
            for c in 0..board.size() {
                if !open.contains(&(r, c)) {
                    filler.push((r, c));
                }
            }
        }
        board.place(Player(1), PieceId::O4, &filler);
        board
    }

    #[test]
    fn test_has_any_legal_move_on_empty_board() {
        let board = Board::new(&GameConfig::duo());
        assert!(has_any_legal_move(&board, Player(0)));
        assert!(has_any_legal_move(&board, Player(1)));
    }

    #[test]
    fn test_no_moves_on_fully_packed_board() {
        let board = packed_board_except(&[]);
        assert!(!has_any_legal_move(&board, Player(0)));
    }

    #[test]
    fn test_single_open_corner_cell_found_for_monomino() {
        // Player 0 owns (4,4); (5,5) is the only empty cell and touches it
        // corner-wise, so exactly the monomino fits there.
        let mut board = Board::new(&GameConfig::duo());
        board.place(Player(0), PieceId::I2, &[(4, 4)]);
        let mut filler: Vec<(usize, usize)> = Vec::new();
        for r in 0..board.size() {
            for c in 0..board.size() {
                if (r, c) != (4, 4) && (r, c) != (5, 5) {
                    filler.push((r, c));
                }
            }
        }
        board.place(Player(1), PieceId::O4, &filler);

        assert!(has_any_legal_move(&board, Player(0)));
        let mv = first_legal_move(&board, Player(0)).unwrap();
        assert_eq!(mv.piece, PieceId::I1);
        assert_eq!(mv.anchor, (5, 5));

        // Same board with the monomino already spent: nothing fits.
        let mut spent = board.clone();
        spent.place(Player(1), PieceId::I1, &[]);
        assert!(!has_any_legal_move(&spent, Player(0)));
    }

    #[test]
    fn test_select_move_returns_legal_first_move() {
        let board = Board::new(&GameConfig::duo());
        let mv = select_move(&board, Player(0), &mut rng()).expect("opening move exists");

        assert_eq!(mv.player, Player(0));
        assert!(!mv.orientation.mirrored);
        let shape = oriented_shape(mv.piece, mv.orientation);
        assert!(rules::check_move(&board, &shape, mv.anchor, Player(0)).is_ok());

        // Largest pieces are tried first and the start cell leads the
        // candidate list, so the opening move is always a pentomino.
        assert_eq!(mv.piece.square_count(), 5);
    }

    #[test]
    fn test_select_move_stays_legal_over_many_turns() {
        let mut board = Board::new(&GameConfig::duo());
        let mut rng = rng();
        for turn in 0..12 {
            let player = Player((turn % 2) as u8);
            let Some(mv) = select_move(&board, player, &mut rng) else {
                break;
            };
            let shape = oriented_shape(mv.piece, mv.orientation);
            assert!(rules::check_move(&board, &shape, mv.anchor, player).is_ok(), "turn {}", turn);
            let cells: Vec<(usize, usize)> = rules::footprint(&shape, mv.anchor)
                .into_iter()
                .map(|(r, c)| (r as usize, c as usize))
                .collect();
            board.place(player, mv.piece, &cells);
        }
        assert!(board.has_placed(Player(0)) && board.has_placed(Player(1)));
    }

    #[test]
    fn test_legal_moves_agrees_with_existence_check() {
        let mut board = Board::new(&GameConfig::duo());
        board.place(Player(0), PieceId::V5, &[(4, 4), (5, 4), (6, 4), (6, 5), (6, 6)]);

        let moves = legal_moves(&board, Player(0));
        assert!(!moves.is_empty());
        assert!(has_any_legal_move(&board, Player(0)));
        for mv in &moves {
            let shape = oriented_shape(mv.piece, mv.orientation);
            assert!(rules::is_legal(&board, &shape, mv.anchor, Player(0)));
        }
    }

    #[test]
    fn test_candidate_cells_start_with_start_cell_and_are_distinct() {
        let board = Board::new(&GameConfig::duo());
        let cells = candidate_cells(&board, Player(0), &mut rng());

        assert_eq!(cells[0], board.start_cell(Player(0)));
        assert!(cells.len() >= MIN_CANDIDATES);
        let distinct: HashSet<_> = cells.iter().collect();
        assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn test_first_legal_move_none_when_packed() {
        let board = packed_board_except(&[]);
        assert_eq!(first_legal_move(&board, Player(0)), None);
    }
}
