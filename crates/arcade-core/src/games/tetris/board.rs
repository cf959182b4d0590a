//! Occupancy grid for locked tetromino cells

use super::piece::Shape;

/// Board width in columns
pub const BOARD_WIDTH: usize = 10;
/// Board height in rows
pub const BOARD_HEIGHT: usize = 20;

/// Fixed 10×20 grid. A cell is `true` iff a locked piece occupies it;
/// the falling piece is never written here until it locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<[bool; BOARD_WIDTH]>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: vec![[false; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows.get(y).is_some_and(|row| row.get(x) == Some(&true))
    }

    pub fn set(&mut self, x: usize, y: usize, occupied: bool) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = occupied;
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[[bool; BOARD_WIDTH]] {
        &self.rows
    }

    /// Whether `shape` anchored at (x, y) leaves the board or overlaps a
    /// locked cell. Rows above the board (negative y) only have to respect
    /// the side walls.
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.filled_cells().any(|(row, col)| {
            let bx = x + col as i32;
            let by = y + row as i32;

            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= self.height() as i32 {
                return true;
            }
            by >= 0 && self.rows[by as usize][bx as usize]
        })
    }

    /// Copy the filled cells of `shape` at (x, y) into the grid. Cells that
    /// fall outside the board are dropped.
    pub fn lock(&mut self, shape: &Shape, x: i32, y: i32) {
        for (row, col) in shape.filled_cells() {
            let bx = x + col as i32;
            let by = y + row as i32;
            if bx >= 0 && by >= 0 {
                self.set(bx as usize, by as usize, true);
            }
        }
    }

    /// Remove every full row, shifting the rows above down and inserting
    /// empty rows at the top. Returns the number of rows removed.
    pub fn clear_full_lines(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().all(|&cell| cell));
        let cleared = before - self.rows.len();

        for _ in 0..cleared {
            self.rows.insert(0, [false; BOARD_WIDTH]);
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tetris::piece::TetrominoKind;

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x, y, true);
        }
    }

    #[test]
    fn test_empty_board_has_no_collisions_inside() {
        let board = Board::new();
        let o = TetrominoKind::O.shape();
        assert!(!board.collides(&o, 0, 0));
        assert!(!board.collides(&o, 8, 18));
    }

    #[test]
    fn test_walls_and_floor_collide() {
        let board = Board::new();
        let o = TetrominoKind::O.shape();
        assert!(board.collides(&o, -1, 5));
        assert!(board.collides(&o, 9, 5));
        assert!(board.collides(&o, 4, 19));
    }

    #[test]
    fn test_rows_above_board_only_check_walls() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let i = TetrominoKind::I.shape().rotated_clockwise();

        // Vertical I spanning rows -4..=-1 never touches the grid
        assert!(!board.collides(&i, 3, -4));
        // ...but still respects the side walls
        assert!(board.collides(&i, -1, -4));
        assert!(board.collides(&i, 10, -4));
        // Reaching row 0 hits the filled row
        assert!(board.collides(&i, 3, -3));
    }

    #[test]
    fn test_collides_matches_cellwise_definition() {
        let mut board = Board::new();
        board.set(2, 10, true);
        board.set(7, 15, true);

        for kind in TetrominoKind::ALL {
            let mut shape = kind.shape();
            for _ in 0..4 {
                for y in -4..=22 {
                    for x in -4..=13 {
                        let expected = shape.filled_cells().any(|(r, c)| {
                            let bx = x + c as i32;
                            let by = y + r as i32;
                            !(0..BOARD_WIDTH as i32).contains(&bx)
                                || by >= BOARD_HEIGHT as i32
                                || (by >= 0 && board.is_occupied(bx as usize, by as usize))
                        });
                        assert_eq!(board.collides(&shape, x, y), expected);
                    }
                }
                shape = shape.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_lock_writes_cells() {
        let mut board = Board::new();
        board.lock(&TetrominoKind::T.shape(), 4, 18);
        assert!(board.is_occupied(5, 18));
        assert!(board.is_occupied(4, 19));
        assert!(board.is_occupied(5, 19));
        assert!(board.is_occupied(6, 19));
        assert!(!board.is_occupied(4, 18));
    }

    #[test]
    fn test_lock_drops_cells_above_board() {
        let mut board = Board::new();
        board.lock(&TetrominoKind::O.shape(), 0, -1);
        assert!(board.is_occupied(0, 0));
        assert!(board.is_occupied(1, 0));
        assert_eq!(board.rows().iter().flatten().filter(|&&c| c).count(), 2);
    }

    #[test]
    fn test_clear_single_full_row_shifts_down() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(3, 18, true);
        board.set(0, 0, true);

        assert_eq!(board.clear_full_lines(), 1);
        assert_eq!(board.height(), BOARD_HEIGHT);
        assert!(board.is_occupied(3, 19));
        assert!(board.is_occupied(0, 1));
        assert!(board.rows()[0].iter().all(|&c| !c));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(5, 18, true);
        board.set(1, 16, true);

        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.height(), BOARD_HEIGHT);
        assert!(board.is_occupied(5, 19));
        assert!(board.is_occupied(1, 18));
        assert_eq!(board.rows().iter().flatten().filter(|&&c| c).count(), 2);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::new();
        board.set(0, 19, true);
        assert_eq!(board.clear_full_lines(), 0);
        assert!(board.is_occupied(0, 19));
    }
}
