//! Tetris engine
//!
//! Board, active piece, line clearing and scoring for one game. Timing and
//! input live with the caller; this type only knows how to move, rotate,
//! lock and drop.

pub mod board;
pub mod piece;

use std::time::Duration;

use rand::Rng;
use tracing::debug;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use piece::{Shape, TetrominoKind};

/// Column of the spawn anchor
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
/// Row of the spawn anchor
pub const SPAWN_Y: i32 = 0;

/// Drop interval at level 1
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);
/// Drop interval shortening per level
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(100);
/// Default lower bound for the drop interval
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);

const POINTS_PER_LINE: u32 = 100;
const LINES_PER_LEVEL: u32 = 10;

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn spawn(kind: TetrominoKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(row, col)| (self.x + col as i32, self.y + row as i32))
    }
}

/// One game of Tetris
#[derive(Debug, Clone)]
pub struct Tetris<R: Rng> {
    board: Board,
    piece: ActivePiece,
    score: u32,
    level: u32,
    lines: u32,
    game_over: bool,
    min_drop_interval: Duration,
    rng: R,
}

impl<R: Rng> Tetris<R> {
    /// Start a fresh game with an empty board and a random first piece
    pub fn new(mut rng: R) -> Self {
        let piece = ActivePiece::spawn(TetrominoKind::random(&mut rng));
        Self {
            board: Board::new(),
            piece,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            min_drop_interval: MIN_DROP_INTERVAL,
            rng,
        }
    }

    /// Override the lower bound of the drop interval
    pub fn with_min_drop_interval(mut self, floor: Duration) -> Self {
        self.min_drop_interval = floor;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    /// Replace the falling piece, e.g. to set up a position in tests
    pub fn set_piece(&mut self, kind: TetrominoKind, x: i32, y: i32) {
        self.piece = ActivePiece {
            kind,
            shape: kind.shape(),
            x,
            y,
        };
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// End the game early (player quit)
    pub fn end(&mut self) {
        self.game_over = true;
    }

    /// Whether `shape` at (x, y) would leave the board or hit a locked cell
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        self.board.collides(shape, x, y)
    }

    /// Move the piece by (dx, dy). Commits and returns `true` only if the
    /// destination is free; otherwise nothing changes.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.piece.x + dx, self.piece.y + dy);
        if self.board.collides(&self.piece.shape, x, y) {
            return false;
        }
        self.piece.x = x;
        self.piece.y = y;
        true
    }

    /// Rotate clockwise in place. Blocked rotations are dropped silently.
    pub fn rotate_clockwise(&mut self) -> bool {
        let rotated = self.piece.shape.rotated_clockwise();
        if self.board.collides(&rotated, self.piece.x, self.piece.y) {
            return false;
        }
        self.piece.shape = rotated;
        true
    }

    /// Write the falling piece into the grid. Does not clear or spawn.
    pub fn lock_piece(&mut self) {
        self.board.lock(&self.piece.shape, self.piece.x, self.piece.y);
    }

    /// Clear full rows and apply scoring. Returns the number of rows cleared.
    pub fn clear_full_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_lines() as u32;
        if cleared > 0 {
            self.lines += cleared;
            self.score += cleared * POINTS_PER_LINE * self.level;
            self.level = self.lines / LINES_PER_LEVEL + 1;
            debug!(
                cleared,
                score = self.score,
                level = self.level,
                "Cleared lines"
            );
        }
        cleared
    }

    /// Spawn a random piece at the spawn anchor. Returns `false` and ends
    /// the game if it does not fit.
    pub fn spawn_next(&mut self) -> bool {
        let kind = TetrominoKind::random(&mut self.rng);
        self.piece = ActivePiece::spawn(kind);
        if self.board.collides(&self.piece.shape, SPAWN_X, SPAWN_Y) {
            debug!(?kind, "Spawn blocked, game over");
            self.game_over = true;
            return false;
        }
        true
    }

    /// One gravity step: move down, or lock, clear and spawn when resting.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
            self.clear_full_lines();
            self.spawn_next();
        }
    }

    /// Time between gravity steps at the current level
    pub fn drop_interval(&self) -> Duration {
        let speedup = DROP_INTERVAL_STEP.saturating_mul(self.level.saturating_sub(1));
        BASE_DROP_INTERVAL
            .saturating_sub(speedup)
            .max(self.min_drop_interval)
    }
}
