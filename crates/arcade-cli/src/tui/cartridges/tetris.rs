//! Tetris cartridge

use std::time::Duration;

use arcade_core::config::GameConfig;
use arcade_core::games::tetris::{Tetris, BOARD_HEIGHT, BOARD_WIDTH};
use arcade_core::themes::ColorRole;
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;

use super::{Cartridge, GameSession, GameSummary};
use crate::tui::canvas::Canvas;
use crate::tui::input::{is_down, is_left, is_right, is_up};

// ============================================================================
// LAYOUT
// ============================================================================

/// Column of the board's left border
const BOARD_X: u16 = 10;
/// Row of the board's top border
const BOARD_Y: u16 = 3;
/// Each cell is drawn two columns wide to look square
const CELL: &str = "██";
const STATS_X: u16 = 35;

pub struct TetrisCartridge;

impl Cartridge for TetrisCartridge {
    fn id(&self) -> &str {
        "tetris"
    }

    fn name(&self) -> &str {
        "TETRIS"
    }

    fn description(&self) -> &str {
        "Classic falling blocks puzzle"
    }

    fn icon(&self) -> &str {
        "🧱"
    }

    fn new_session(&self, rng: StdRng, config: &GameConfig) -> Box<dyn GameSession> {
        Box::new(TetrisSession {
            game: Tetris::new(rng).with_min_drop_interval(config.min_drop_interval()),
        })
    }
}

pub struct TetrisSession {
    game: Tetris<StdRng>,
}

impl GameSession for TetrisSession {
    fn physics_interval(&self) -> Duration {
        self.game.drop_interval()
    }

    fn handle_key(&mut self, key: &KeyEvent, _now: Duration) {
        if is_left(key) {
            self.game.try_move(-1, 0);
        } else if is_right(key) {
            self.game.try_move(1, 0);
        } else if is_down(key) {
            self.game.try_move(0, 1);
        } else if is_up(key) {
            self.game.rotate_clockwise();
        }
    }

    fn step(&mut self) {
        self.game.step();
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_bold(1, 1, "TETRIS", ColorRole::Primary);

        let inner_width = BOARD_WIDTH * CELL.chars().count();
        let horizontal = "─".repeat(inner_width);
        let bottom_y = BOARD_Y + BOARD_HEIGHT as u16 + 1;
        canvas.draw(BOARD_X, BOARD_Y, &format!("┌{horizontal}┐"), ColorRole::Border);
        canvas.draw(BOARD_X, bottom_y, &format!("└{horizontal}┘"), ColorRole::Border);
        for row in 0..BOARD_HEIGHT as u16 {
            let y = BOARD_Y + 1 + row;
            canvas.draw(BOARD_X, y, "│", ColorRole::Border);
            canvas.draw(BOARD_X + 1 + inner_width as u16, y, "│", ColorRole::Border);
        }

        let board = self.game.board();
        for (y, row) in board.rows().iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    let (cx, cy) = cell_origin(x as i32, y as i32);
                    canvas.draw(cx, cy, CELL, ColorRole::GameArea);
                }
            }
        }

        // Falling piece; rows above the board stay hidden
        for (x, y) in self.game.piece().cells() {
            if y >= 0 && (0..BOARD_WIDTH as i32).contains(&x) {
                let (cx, cy) = cell_origin(x, y);
                canvas.draw(cx, cy, CELL, ColorRole::Player);
            }
        }

        let stats = [
            format!("Score: {}", self.game.score()),
            format!("Level: {}", self.game.level()),
            format!("Lines: {}", self.game.lines()),
        ];
        for (i, line) in stats.iter().enumerate() {
            canvas.draw(STATS_X, 5 + i as u16, line, ColorRole::Success);
        }

        canvas.draw(STATS_X, 10, "Controls:", ColorRole::Secondary);
        let controls = ["A/D - Move", "S - Drop", "W - Rotate", "Q - Quit"];
        for (i, line) in controls.iter().enumerate() {
            canvas.draw(STATS_X, 11 + i as u16, line, ColorRole::Text);
        }
    }

    fn is_over(&self) -> bool {
        self.game.is_game_over()
    }

    fn quit(&mut self) {
        self.game.end();
    }

    fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.game.score(),
            level: self.game.level(),
            lines: Some(self.game.lines()),
        }
    }
}

fn cell_origin(x: i32, y: i32) -> (u16, u16) {
    (BOARD_X + 1 + x as u16 * 2, BOARD_Y + 1 + y as u16)
}
