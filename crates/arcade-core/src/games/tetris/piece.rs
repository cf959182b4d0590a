//! Tetromino shapes and the clockwise rotation transform

use rand::Rng;

/// The seven standard tetrominoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    /// Every kind, in shape-table order
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    /// Spawn orientation of this kind
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoKind::I => &[&[1, 1, 1, 1]],
            TetrominoKind::O => &[&[1, 1], &[1, 1]],
            TetrominoKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            TetrominoKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            TetrominoKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            TetrominoKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        Shape::from_rows(rows)
    }

    /// Draw a kind uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// A small binary matrix of filled cells
///
/// Stored row-major; `rows * cols == cells.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values. Rows must share one length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| v != 0))
            .collect();
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Iterate `(row, col)` offsets of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| (i / self.cols, i % self.cols))
    }

    /// Rotate 90° clockwise: an R×C matrix becomes C×R with
    /// `out[c][r] = self[R-1-r][c]`.
    pub fn rotated_clockwise(&self) -> Shape {
        let (rows, cols) = (self.rows, self.cols);
        let mut cells = Vec::with_capacity(self.cells.len());
        for c in 0..cols {
            for r in 0..rows {
                cells.push(self.cells[(rows - 1 - r) * cols + c]);
            }
        }
        Shape {
            rows: cols,
            cols: rows,
            cells,
        }
    }
}
