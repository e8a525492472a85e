//! Move legality. The check runs as a fast-fail chain: bounds, then
//! occupancy, then either the first-move starting-cell rule or the
//! corner-contact adjacency rule. Same-color pieces may touch only at
//! corners; a single side contact anywhere in the footprint rejects the
//! whole move.

use std::error::Error;
use std::fmt;

use crate::board::{Board, Player};
use crate::pieces::{Orientation, PieceId, Shape};

/// Why a proposed placement violates the rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RuleViolation {
    /// Part of the footprint lies outside the board.
    OutOfBounds,
    /// Part of the footprint lands on an occupied cell.
    CellOccupied,
    /// A first move must cover the player's starting cell.
    FirstMoveRuleViolation,
    /// Subsequent moves must touch an own piece at a corner and never along
    /// a side.
    AdjacencyRuleViolation,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::OutOfBounds => write!(f, "piece extends outside the board"),
            RuleViolation::CellOccupied => write!(f, "cell is already occupied"),
            RuleViolation::FirstMoveRuleViolation => {
                write!(f, "first move must cover your starting cell")
            }
            RuleViolation::AdjacencyRuleViolation => {
                write!(f, "piece must touch your color at a corner and never along a side")
            }
        }
    }
}

impl Error for RuleViolation {}

/// A proposed placement: which piece, in which orientation, anchored where,
/// by whom. Built, validated, and discarded within a single turn.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub piece: PieceId,
    pub orientation: Orientation,
    pub anchor: (usize, usize),
    pub player: Player,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at ({},{})",
            self.piece, self.orientation, self.anchor.0, self.anchor.1
        )
    }
}

/// Absolute board coordinates covered by `shape` anchored at `anchor`.
/// Coordinates may be negative or past the edge; the bounds check is the
/// validator's first step.
pub fn footprint(shape: &Shape, anchor: (usize, usize)) -> Vec<(i32, i32)> {
    shape
        .cells()
        .iter()
        .map(|&(dr, dc)| (anchor.0 as i32 + dr, anchor.1 as i32 + dc))
        .collect()
}

/// Full legality check for one placement. Returns the first rule the move
/// violates, in check order.
pub fn check_move(
    board: &Board,
    shape: &Shape,
    anchor: (usize, usize),
    player: Player,
) -> Result<(), RuleViolation> {
    let cells = footprint(shape, anchor);

    // A footprint that straddles the edge must fail here, before any
    // occupancy or adjacency probe touches the grid.
    for &(r, c) in &cells {
        if !board.in_bounds(r, c) {
            return Err(RuleViolation::OutOfBounds);
        }
    }

    for &(r, c) in &cells {
        if board.owner_at(r, c).is_some() {
            return Err(RuleViolation::CellOccupied);
        }
    }

    if !board.has_placed(player) {
        let start = board.start_cell(player);
        let covers_start = cells.iter().any(|&(r, c)| (r as usize, c as usize) == start);
        if !covers_start {
            return Err(RuleViolation::FirstMoveRuleViolation);
        }
        return Ok(());
    }

    // Both adjacency conditions are judged across the entire footprint:
    // one corner contact somewhere is required, one side contact anywhere
    // is fatal.
    let mut corner_touch = false;
    for &(r, c) in &cells {
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if board.owner_at(r + dr, c + dc) == Some(player) {
                    if dr.abs() + dc.abs() == 1 {
                        return Err(RuleViolation::AdjacencyRuleViolation);
                    }
                    corner_touch = true;
                }
            }
        }
    }

    if corner_touch {
        Ok(())
    } else {
        Err(RuleViolation::AdjacencyRuleViolation)
    }
}

/// Boolean wrapper over [`check_move`] for search loops.
pub fn is_legal(board: &Board, shape: &Shape, anchor: (usize, usize), player: Player) -> bool {
    check_move(board, shape, anchor, player).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameConfig;
    use crate::pieces::{oriented_shape, Orientation};

    fn empty_board() -> Board {
        Board::new(&GameConfig::duo())
    }

    fn default_shape(id: PieceId) -> Shape {
        oriented_shape(id, Orientation::default())
    }

    #[test]
    fn test_out_of_bounds_fails_before_anything_else() {
        let board = empty_board();
        let i5 = default_shape(PieceId::I5);

        // Anchor near the right edge so the footprint straddles it.
        assert_eq!(
            check_move(&board, &i5, (4, 12), Player(0)),
            Err(RuleViolation::OutOfBounds)
        );
        assert_eq!(
            check_move(&board, &i5, (13, 13), Player(0)),
            Err(RuleViolation::OutOfBounds)
        );
    }

    #[test]
    fn test_first_move_must_cover_start_cell() {
        let board = empty_board();
        let i1 = default_shape(PieceId::I1);

        assert!(check_move(&board, &i1, (4, 4), Player(0)).is_ok());
        assert_eq!(
            check_move(&board, &i1, (7, 7), Player(0)),
            Err(RuleViolation::FirstMoveRuleViolation)
        );

        // Any footprint cell on the start cell qualifies, not just the anchor.
        let i3 = default_shape(PieceId::I3);
        assert!(check_move(&board, &i3, (4, 2), Player(0)).is_ok());

        // Player 2 has a different start cell.
        assert!(check_move(&board, &i1, (9, 9), Player(1)).is_ok());
        assert_eq!(
            check_move(&board, &i1, (4, 4), Player(1)),
            Err(RuleViolation::FirstMoveRuleViolation)
        );
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = empty_board();
        board.place(Player(0), PieceId::I1, &[(4, 4)]);

        let i1 = default_shape(PieceId::I1);
        assert_eq!(
            check_move(&board, &i1, (4, 4), Player(1)),
            Err(RuleViolation::CellOccupied)
        );
    }

    #[test]
    fn test_side_contact_rejected_corner_contact_accepted() {
        let mut board = empty_board();
        board.place(Player(0), PieceId::O4, &[(4, 4), (4, 5), (5, 4), (5, 5)]);

        let i2 = default_shape(PieceId::I2);

        // Shares an edge with (5,4)-(5,5): rejected.
        assert_eq!(
            check_move(&board, &i2, (6, 4), Player(0)),
            Err(RuleViolation::AdjacencyRuleViolation)
        );

        // Touches only the corner of (5,5): accepted.
        assert!(check_move(&board, &i2, (6, 6), Player(0)).is_ok());

        // No contact at all: rejected.
        assert_eq!(
            check_move(&board, &i2, (10, 10), Player(0)),
            Err(RuleViolation::AdjacencyRuleViolation)
        );
    }

    #[test]
    fn test_one_side_contact_poisons_whole_footprint() {
        let mut board = empty_board();
        board.place(Player(0), PieceId::I1, &[(4, 4)]);

        // Vertical I2 at (5,5),(6,5): corner contact only.
        let i2_vertical =
            oriented_shape(PieceId::I2, Orientation::new(crate::pieces::Rotation::R90, false));
        assert!(check_move(&board, &i2_vertical, (5, 5), Player(0)).is_ok());

        // Horizontal I2 at (5,4)-(5,5): (5,4) side-touches (4,4) even though
        // (5,5) has the corner contact.
        let i2 = default_shape(PieceId::I2);
        assert_eq!(
            check_move(&board, &i2, (5, 4), Player(0)),
            Err(RuleViolation::AdjacencyRuleViolation)
        );
    }

    #[test]
    fn test_opponent_pieces_do_not_satisfy_or_violate_adjacency() {
        let mut board = empty_board();
        board.place(Player(0), PieceId::I1, &[(4, 4)]);
        board.place(Player(1), PieceId::I1, &[(9, 9)]);

        // Side contact with the opponent is fine; the move still needs a
        // corner contact with an own piece.
        let i1 = default_shape(PieceId::I1);
        assert_eq!(
            check_move(&board, &i1, (9, 8), Player(0)),
            Err(RuleViolation::AdjacencyRuleViolation)
        );
        assert!(check_move(&board, &i1, (5, 5), Player(0)).is_ok());
    }

    #[test]
    fn test_footprint_maps_orientation_offsets() {
        let v3 = default_shape(PieceId::V3);
        let cells = footprint(&v3, (2, 3));
        assert_eq!(cells, vec![(2, 3), (3, 3), (3, 4)]);
    }
}
