//! Board state: cell ownership grid, per-seat used-piece records, and the
//! fixed starting cells. All coordinate access goes through bounds-checked
//! accessors so the validator and the search share one bounds policy.

use std::collections::BTreeSet;
use std::fmt;

use crate::pieces::PieceId;

/// Side length of the standard two-player board.
pub const BOARD_SIZE: usize = 14;

/// Starting cells for up to four seats, in seat order.
const START_CELLS: [(usize, usize); 4] = [(4, 4), (9, 9), (4, 9), (9, 4)];

/// A seat at the table. Seats are numbered from zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Player(pub u8);

impl Player {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Ownership of a single board cell. `None` is empty; once a cell becomes
/// `Some(player)` it stays that way for the rest of the game.
pub type Cell = Option<Player>;

/// Geometry and seating for one game. The data model is generic over seat
/// count; two seats is the shipped configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board_size: usize,
    pub seats: usize,
}

impl GameConfig {
    /// The standard two-player setup on a 14x14 board.
    pub fn duo() -> Self {
        GameConfig { board_size: BOARD_SIZE, seats: 2 }
    }

    /// A setup with 2 to 4 seats on the standard board.
    pub fn with_seats(seats: usize) -> Self {
        assert!((2..=START_CELLS.len()).contains(&seats), "unsupported seat count {}", seats);
        GameConfig { board_size: BOARD_SIZE, seats }
    }

    pub fn start_cell(&self, player: Player) -> (usize, usize) {
        START_CELLS[player.index()]
    }

    pub fn players(&self) -> impl Iterator<Item = Player> {
        (0..self.seats as u8).map(Player)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::duo()
    }
}

/// The mutable game grid plus the per-seat used-piece records.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    seats: usize,
    cells: Vec<Cell>,
    used: Vec<BTreeSet<PieceId>>,
    start_cells: Vec<(usize, usize)>,
}

impl Board {
    pub fn new(config: &GameConfig) -> Self {
        Board {
            size: config.board_size,
            seats: config.seats,
            cells: vec![None; config.board_size * config.board_size],
            used: vec![BTreeSet::new(); config.seats],
            start_cells: config.players().map(|p| config.start_cell(p)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    pub fn in_bounds(&self, r: i32, c: i32) -> bool {
        r >= 0 && (r as usize) < self.size && c >= 0 && (c as usize) < self.size
    }

    /// Cell at (r, c), or `None` when the coordinate is off the board.
    pub fn cell(&self, r: usize, c: usize) -> Option<Cell> {
        if r < self.size && c < self.size {
            Some(self.cells[r * self.size + c])
        } else {
            None
        }
    }

    /// Owner of (r, c); `None` for empty cells and off-board coordinates.
    /// Adjacency scans probe neighbors through this without their own
    /// bounds checks.
    pub fn owner_at(&self, r: i32, c: i32) -> Option<Player> {
        if self.in_bounds(r, c) {
            self.cells[r as usize * self.size + c as usize]
        } else {
            None
        }
    }

    pub fn start_cell(&self, player: Player) -> (usize, usize) {
        self.start_cells[player.index()]
    }

    /// True once the player has at least one piece on the board.
    pub fn has_placed(&self, player: Player) -> bool {
        !self.used[player.index()].is_empty()
    }

    pub fn used_pieces(&self, player: Player) -> &BTreeSet<PieceId> {
        &self.used[player.index()]
    }

    /// The seat that placed a piece, if anyone has. Pieces come from a
    /// shared pool: once placed by any seat, an identifier is gone for
    /// everyone.
    pub fn piece_used_by(&self, id: PieceId) -> Option<Player> {
        (0..self.seats as u8)
            .map(Player)
            .find(|p| self.used[p.index()].contains(&id))
    }

    /// Catalog pieces no seat has placed yet.
    pub fn unused_pieces(&self) -> Vec<PieceId> {
        PieceId::ALL
            .iter()
            .copied()
            .filter(|&id| self.piece_used_by(id).is_none())
            .collect()
    }

    /// Cells currently owned by the player.
    pub fn owned_cells(&self, player: Player) -> Vec<(usize, usize)> {
        let mut owned = Vec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if self.cells[r * self.size + c] == Some(player) {
                    owned.push((r, c));
                }
            }
        }
        owned
    }

    /// Marks a validated footprint and records the piece as used. Callers
    /// must have run the full legality check first; this method only
    /// commits, it never re-validates.
    pub(crate) fn place(&mut self, player: Player, id: PieceId, cells: &[(usize, usize)]) {
        for &(r, c) in cells {
            self.cells[r * self.size + c] = Some(player);
        }
        self.used[player.index()].insert(id);
    }

    /// Clears the grid and the used-piece records for a new game.
    pub(crate) fn reset(&mut self) {
        self.cells.fill(None);
        for used in &mut self.used {
            used.clear();
        }
    }
}
