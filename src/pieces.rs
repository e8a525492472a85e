//! The piece catalog: 20 fixed polyomino shapes (1 to 5 squares), their
//! orientation sets, and square counts. Catalog data is immutable and shared
//! by all players.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identifier of one of the 20 catalog pieces. The set is closed, so every
/// identifier is statically valid and lookups cannot fail.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceId {
    I1,
    I2,
    I3,
    V3,
    I4,
    L4,
    T4,
    Z4,
    O4,
    I5,
    L5,
    S5,
    P5,
    U5,
    T5,
    V5,
    W5,
    F5,
    X5,
    Z5,
}

impl PieceId {
    pub const ALL: [PieceId; 20] = [
        PieceId::I1,
        PieceId::I2,
        PieceId::I3,
        PieceId::V3,
        PieceId::I4,
        PieceId::L4,
        PieceId::T4,
        PieceId::Z4,
        PieceId::O4,
        PieceId::I5,
        PieceId::L5,
        PieceId::S5,
        PieceId::P5,
        PieceId::U5,
        PieceId::T5,
        PieceId::V5,
        PieceId::W5,
        PieceId::F5,
        PieceId::X5,
        PieceId::Z5,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceId::I1 => "I1",
            PieceId::I2 => "I2",
            PieceId::I3 => "I3",
            PieceId::V3 => "V3",
            PieceId::I4 => "I4",
            PieceId::L4 => "L4",
            PieceId::T4 => "T4",
            PieceId::Z4 => "Z4",
            PieceId::O4 => "O4",
            PieceId::I5 => "I5",
            PieceId::L5 => "L5",
            PieceId::S5 => "S5",
            PieceId::P5 => "P5",
            PieceId::U5 => "U5",
            PieceId::T5 => "T5",
            PieceId::V5 => "V5",
            PieceId::W5 => "W5",
            PieceId::F5 => "F5",
            PieceId::X5 => "X5",
            PieceId::Z5 => "Z5",
        }
    }

    /// Number of squares in the canonical shape.
    pub fn square_count(self) -> usize {
        shape(self).square_count()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PieceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PieceId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown piece '{}'", s))
    }
}

/// A quarter-turn rotation applied to a canonical shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    fn quarter_turns(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Rotation::R0),
            "90" => Ok(Rotation::R90),
            "180" => Ok(Rotation::R180),
            "270" => Ok(Rotation::R270),
            other => Err(format!("invalid rotation '{}', expected 0/90/180/270", other)),
        }
    }
}

/// One rotational/mirrored variant of a piece, as chosen by a player or the
/// move search. Realized into a concrete [`Shape`] with [`oriented_shape`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Orientation {
    pub rotation: Rotation,
    pub mirrored: bool,
}

impl Orientation {
    pub fn new(rotation: Rotation, mirrored: bool) -> Self {
        Self { rotation, mirrored }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rotation.degrees(), if self.mirrored { "m" } else { "" })
    }
}

/// A concrete piece footprint: normalized (row, col) square offsets, sorted.
/// Offsets are normalized so the minimum row and column are both zero.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    cells: Vec<(i32, i32)>,
}

impl Shape {
    fn from_rows(rows: &[&[bool]]) -> Self {
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &occupied) in row.iter().enumerate() {
                if occupied {
                    cells.push((r as i32, c as i32));
                }
            }
        }
        Self::normalized(cells)
    }

    fn normalized(mut cells: Vec<(i32, i32)>) -> Self {
        let min_r = cells.iter().map(|p| p.0).min().unwrap_or(0);
        let min_c = cells.iter().map(|p| p.1).min().unwrap_or(0);
        for p in &mut cells {
            *p = (p.0 - min_r, p.1 - min_c);
        }
        cells.sort();
        Shape { cells }
    }

    /// Occupied squares as offsets relative to the shape's anchor cell.
    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells
    }

    pub fn square_count(&self) -> usize {
        self.cells.len()
    }

    /// Rows and columns spanned by the footprint.
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|p| p.0).max().unwrap_or(-1) + 1;
        let cols = self.cells.iter().map(|p| p.1).max().unwrap_or(-1) + 1;
        (rows as usize, cols as usize)
    }

    /// The footprint as a dense boolean grid, `true` for occupied squares.
    pub fn grid(&self) -> Vec<Vec<bool>> {
        let (rows, cols) = self.dimensions();
        let mut grid = vec![vec![false; cols]; rows];
        for &(r, c) in &self.cells {
            grid[r as usize][c as usize] = true;
        }
        grid
    }

    fn rotated(&self) -> Shape {
        Shape::normalized(self.cells.iter().map(|&(r, c)| (-c, r)).collect())
    }

    fn mirrored(&self) -> Shape {
        Shape::normalized(self.cells.iter().map(|&(r, c)| (r, -c)).collect())
    }
}

struct PieceDef {
    shape: Shape,
    orientations: Vec<Shape>,
}

impl PieceDef {
    fn new(rows: &[&[bool]]) -> Self {
        let shape = Shape::from_rows(rows);

        // All 8 symmetries, keeping only distinct footprints. Symmetric
        // pieces collapse to fewer entries; duplicates would only cost the
        // search redundant checks, but the dedup keeps enumeration tight.
        let mut orientations: Vec<Shape> = Vec::with_capacity(8);
        let mut current = shape.clone();
        for _ in 0..2 {
            for _ in 0..4 {
                if !orientations.contains(&current) {
                    orientations.push(current.clone());
                }
                current = current.rotated();
            }
            current = current.mirrored();
        }

        PieceDef { shape, orientations }
    }
}

const T: bool = true;
const F: bool = false;

fn catalog() -> &'static Vec<PieceDef> {
    static CATALOG: OnceLock<Vec<PieceDef>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            // I1 (monomino)
            PieceDef::new(&[&[T]]),
            // I2 (domino)
            PieceDef::new(&[&[T, T]]),
            // I3
            PieceDef::new(&[&[T, T, T]]),
            // V3
            PieceDef::new(&[&[T, F], &[T, T]]),
            // I4
            PieceDef::new(&[&[T, T, T, T]]),
            // L4
            PieceDef::new(&[&[T, F, F], &[T, T, T]]),
            // T4
            PieceDef::new(&[&[F, T, F], &[T, T, T]]),
            // Z4
            PieceDef::new(&[&[T, T, F], &[F, T, T]]),
            // O4
            PieceDef::new(&[&[T, T], &[T, T]]),
            // I5
            PieceDef::new(&[&[T, T, T, T, T]]),
            // L5
            PieceDef::new(&[&[T, F, F, F], &[T, T, T, T]]),
            // S5
            PieceDef::new(&[&[F, T, T, T], &[T, T, F, F]]),
            // P5
            PieceDef::new(&[&[T, T, T], &[T, T, F]]),
            // U5
            PieceDef::new(&[&[T, F, T], &[T, T, T]]),
            // T5
            PieceDef::new(&[&[T, T, T], &[F, T, F], &[F, T, F]]),
            // V5
            PieceDef::new(&[&[T, F, F], &[T, F, F], &[T, T, T]]),
            // W5
            PieceDef::new(&[&[T, F, F], &[T, T, F], &[F, T, T]]),
            // F5
            PieceDef::new(&[&[F, T, T], &[T, T, F], &[F, T, F]]),
            // X5
            PieceDef::new(&[&[F, T, F], &[T, T, T], &[F, T, F]]),
            // Z5
            PieceDef::new(&[&[T, T, F], &[F, T, F], &[F, T, T]]),
        ]
    })
}

/// Canonical shape of a piece.
pub fn shape(id: PieceId) -> &'static Shape {
    &catalog()[id as usize].shape
}

/// Every distinct footprint reachable by the 4 rotations and their mirrors.
pub fn orientations(id: PieceId) -> &'static [Shape] {
    &catalog()[id as usize].orientations
}

/// Realizes a specific rotation/mirror descriptor of a piece.
pub fn oriented_shape(id: PieceId, orientation: Orientation) -> Shape {
    let mut shape = shape(id).clone();
    for _ in 0..orientation.rotation.quarter_turns() {
        shape = shape.rotated();
    }
    if orientation.mirrored {
        shape = shape.mirrored();
    }
    shape
}

/// Total squares across the whole catalog. The per-player score baseline is
/// the negative of this value.
pub fn catalog_square_total() -> usize {
    PieceId::ALL.iter().map(|id| id.square_count()).sum()
}
