//! Galaga cartridge

use std::time::Duration;

use arcade_core::config::GameConfig;
use arcade_core::games::galaga::{
    EnemyKind, Galaga, Shooter, FIELD_HEIGHT, FIELD_WIDTH, PHYSICS_INTERVAL,
};
use arcade_core::themes::ColorRole;
use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;

use super::{Cartridge, GameSession, GameSummary};
use crate::tui::canvas::Canvas;
use crate::tui::input::{is_left, is_right};

// ============================================================================
// LAYOUT
// ============================================================================

/// Screen column of field x = 0
const FIELD_X: u16 = 2;
/// Screen row of field y = 0
const FIELD_Y: u16 = 5;
/// Width reserved on the right for the HUD
const HUD_WIDTH: u16 = 20;

pub struct GalagaCartridge;

impl Cartridge for GalagaCartridge {
    fn id(&self) -> &str {
        "galaga"
    }

    fn name(&self) -> &str {
        "GALAGA"
    }

    fn description(&self) -> &str {
        "Classic space shooter"
    }

    fn icon(&self) -> &str {
        "🚀"
    }

    fn new_session(&self, rng: StdRng, _config: &GameConfig) -> Box<dyn GameSession> {
        Box::new(GalagaSession {
            game: Galaga::new(rng),
        })
    }
}

pub struct GalagaSession {
    game: Galaga<StdRng>,
}

impl GameSession for GalagaSession {
    fn physics_interval(&self) -> Duration {
        PHYSICS_INTERVAL
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Duration) {
        if is_left(key) {
            self.game.move_player(-1);
        } else if is_right(key) {
            self.game.move_player(1);
        } else if key.code == KeyCode::Char(' ') {
            self.game.try_shoot(now);
        }
    }

    fn step(&mut self) {
        self.game.step();
    }

    fn tick(&mut self, now: Duration) {
        self.game.tick(now);
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let (width, _) = canvas.size();
        let player = self.game.player();

        canvas.draw_bold(1, 1, "GALAGA", ColorRole::Primary);
        let hud_x = width.saturating_sub(HUD_WIDTH);
        canvas.draw(hud_x, 1, &format!("Score: {}", player.score), ColorRole::Success);
        canvas.draw(hud_x, 2, &format!("Lives: {}", player.lives), ColorRole::Warning);
        canvas.draw(hud_x, 3, &format!("Level: {}", player.level), ColorRole::Text);

        // Frame around the field, one cell outside it on every side
        let left = FIELD_X - 1;
        let right = FIELD_X + FIELD_WIDTH as u16;
        let top = FIELD_Y - 1;
        let bottom = FIELD_Y + FIELD_HEIGHT as u16;
        let horizontal = "─".repeat(FIELD_WIDTH as usize);
        canvas.draw(FIELD_X, top, &horizontal, ColorRole::Border);
        canvas.draw(FIELD_X, bottom, &horizontal, ColorRole::Border);
        for y in FIELD_Y..bottom {
            canvas.draw(left, y, "│", ColorRole::Border);
            canvas.draw(right, y, "│", ColorRole::Border);
        }

        for enemy in self.game.enemies() {
            let role = match enemy.kind {
                EnemyKind::Basic => ColorRole::Enemy,
                EnemyKind::Strong => ColorRole::Secondary,
                EnemyKind::Boss => ColorRole::Error,
            };
            draw_entity(canvas, enemy.x, enemy.y, &enemy.kind.glyph().to_string(), role);
        }

        for bullet in self.game.bullets() {
            let (glyph, role) = match bullet.shooter {
                Shooter::Player => ("│", ColorRole::Bullet),
                Shooter::Enemy => ("!", ColorRole::Enemy),
            };
            draw_entity(canvas, bullet.x, bullet.y, glyph, role);
        }

        draw_entity(canvas, player.x, player.y, "▲", ColorRole::Player);

        canvas.draw(1, bottom + 2, "Controls:", ColorRole::Secondary);
        canvas.draw(
            1,
            bottom + 3,
            "A/D - Move   Space - Shoot   Q - Quit",
            ColorRole::Text,
        );
    }

    fn is_over(&self) -> bool {
        self.game.is_game_over()
    }

    fn quit(&mut self) {
        self.game.end();
    }

    fn summary(&self) -> GameSummary {
        let player = self.game.player();
        GameSummary {
            score: player.score,
            level: player.level,
            lines: None,
        }
    }
}

/// Draw at a field position; anything outside the field is skipped
fn draw_entity(canvas: &mut dyn Canvas, x: i32, y: i32, glyph: &str, role: ColorRole) {
    if (0..FIELD_WIDTH).contains(&x) && (0..FIELD_HEIGHT).contains(&y) {
        canvas.draw(FIELD_X + x as u16, FIELD_Y + y as u16, glyph, role);
    }
}
