//! Galaga-style shooter engine
//!
//! Entities live on a 60×20 cell field. Physics advances in discrete
//! steps (see [`PHYSICS_INTERVAL`]); spawning and level progression are
//! driven by [`Galaga::tick`] with the session clock. All randomness comes
//! from the injected RNG so a seeded game replays exactly.

pub mod entities;

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

pub use entities::{Bullet, Enemy, EnemyKind, Player, Shooter};

pub const FIELD_WIDTH: i32 = 60;
pub const FIELD_HEIGHT: i32 = 20;
/// Row the player ship sits on
pub const PLAYER_ROW: i32 = FIELD_HEIGHT - 2;
pub const INITIAL_LIVES: u32 = 3;

/// Time between physics steps
pub const PHYSICS_INTERVAL: Duration = Duration::from_millis(100);
/// Minimum time between two player shots
pub const SHOT_COOLDOWN: Duration = Duration::from_millis(200);
/// Time between periodic spawn rolls
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(2000);

const ENEMY_FIRE_CHANCE: f64 = 0.05;
const DRIFT_DOWN_CHANCE: f64 = 0.02;
const DRIFT_SIDE_CHANCE: f64 = 0.05;
const RANDOM_SPAWN_CHANCE: f64 = 0.3;
const RANDOM_SPAWN_BASIC_CHANCE: f64 = 0.7;

/// Enemies at or below this row are too close to fire
const FIRE_CEILING: i32 = FIELD_HEIGHT - 5;
/// Enemies reaching this row break through
const BREACH_ROW: i32 = FIELD_HEIGHT - 2;

/// One game of the shooter
#[derive(Debug, Clone)]
pub struct Galaga<R: Rng> {
    player: Player,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    game_over: bool,
    last_shot: Option<Duration>,
    last_spawn: Duration,
    rng: R,
}

impl<R: Rng> Galaga<R> {
    /// Start a fresh game at level 1 with the first wave on the field
    pub fn new(rng: R) -> Self {
        let mut game = Self::empty(rng);
        game.spawn_wave(game.player.level);
        game
    }

    /// A game with no enemies on the field
    pub fn empty(rng: R) -> Self {
        Self {
            player: Player::new(FIELD_WIDTH / 2, PLAYER_ROW, INITIAL_LIVES),
            bullets: Vec::new(),
            enemies: Vec::new(),
            game_over: false,
            last_shot: None,
            last_spawn: Duration::ZERO,
            rng,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// End the game early (player quit)
    pub fn end(&mut self) {
        self.game_over = true;
    }

    /// Move the ship sideways, clamped to the field. Returns whether it moved.
    pub fn move_player(&mut self, dx: i32) -> bool {
        let x = (self.player.x + dx).clamp(1, FIELD_WIDTH - 2);
        let moved = x != self.player.x;
        self.player.x = x;
        moved
    }

    /// Fire from just above the ship unless the cooldown since the last
    /// successful shot is still running.
    pub fn try_shoot(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) <= SHOT_COOLDOWN {
                return false;
            }
        }
        self.bullets.push(Bullet::new(
            self.player.x,
            self.player.y - 1,
            Shooter::Player,
        ));
        self.last_shot = Some(now);
        true
    }

    /// Add `5 + level * 2` enemies in the top band, uniform over the tiers
    pub fn spawn_wave(&mut self, level: u32) {
        let size = 5 + level as usize * 2;
        for _ in 0..size {
            let x = self.rng.gen_range(2..FIELD_WIDTH - 2);
            let y = self.rng.gen_range(1..5);
            let kind = *EnemyKind::ALL
                .choose(&mut self.rng)
                .unwrap_or(&EnemyKind::Basic);
            self.enemies.push(Enemy::new(x, y, kind));
        }
        debug!(level, size, "Spawned wave");
    }

    /// Drop one to three stragglers on the top row, mostly basic ones
    pub fn spawn_random(&mut self) {
        let count = self.rng.gen_range(1..4);
        for _ in 0..count {
            let x = self.rng.gen_range(2..FIELD_WIDTH - 2);
            let kind = if self.rng.gen_bool(RANDOM_SPAWN_BASIC_CHANCE) {
                EnemyKind::Basic
            } else {
                EnemyKind::Strong
            };
            self.enemies.push(Enemy::new(x, 1, kind));
        }
    }

    /// Advance bullets, drop the ones that left the field, and maybe let a
    /// random enemy fire.
    pub fn update_bullets(&mut self) {
        self.bullets.retain_mut(|bullet| {
            bullet.advance();
            bullet.in_bounds(FIELD_HEIGHT)
        });

        if self.rng.gen_bool(ENEMY_FIRE_CHANCE) {
            let shooters: Vec<(i32, i32)> = self
                .enemies
                .iter()
                .filter(|enemy| enemy.y < FIRE_CEILING)
                .map(|enemy| (enemy.x, enemy.y))
                .collect();
            if let Some(&(x, y)) = shooters.choose(&mut self.rng) {
                self.bullets.push(Bullet::new(x, y + 1, Shooter::Enemy));
            }
        }
    }

    /// Random drift for every enemy. Enemies reaching the breach row are
    /// removed and cost a life.
    pub fn update_enemies(&mut self) {
        for enemy in self.enemies.iter_mut() {
            if self.rng.gen_bool(DRIFT_DOWN_CHANCE) {
                enemy.y += 1;
            }
            if self.rng.gen_bool(DRIFT_SIDE_CHANCE) {
                let dx = if self.rng.gen_bool(0.5) { 1 } else { -1 };
                enemy.x = (enemy.x + dx).clamp(1, FIELD_WIDTH - 2);
            }
        }

        let before = self.enemies.len();
        self.enemies.retain(|enemy| enemy.y < BREACH_ROW);
        for _ in 0..before - self.enemies.len() {
            debug!("Enemy broke through");
            self.lose_life();
        }
    }

    /// Resolve hits for this step:
    /// 1. player bullets vs enemies (both removed, score credited)
    /// 2. enemy bullets vs player (bullet removed, life lost)
    /// 3. enemies vs player (enemy removed, life lost)
    pub fn check_collisions(&mut self) {
        let Self {
            player,
            bullets,
            enemies,
            ..
        } = self;

        bullets.retain(|bullet| {
            if bullet.shooter != Shooter::Player {
                return true;
            }
            match enemies
                .iter()
                .position(|enemy| enemy.x == bullet.x && enemy.y == bullet.y)
            {
                Some(idx) => {
                    let enemy = enemies.remove(idx);
                    player.score += enemy.kind.points();
                    false
                }
                None => true,
            }
        });

        let mut hits = 0;
        bullets.retain(|bullet| {
            let hit = bullet.shooter == Shooter::Enemy
                && bullet.x == player.x
                && bullet.y == player.y;
            if hit {
                hits += 1;
            }
            !hit
        });
        enemies.retain(|enemy| {
            let hit = enemy.x == player.x && enemy.y == player.y;
            if hit {
                hits += 1;
            }
            !hit
        });

        for _ in 0..hits {
            self.lose_life();
        }
    }

    /// One physics step: bullets, enemy drift, collisions
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        self.update_bullets();
        self.update_enemies();
        self.check_collisions();
    }

    /// Timed events outside the physics step: the periodic spawn roll and
    /// level progression once the field is clear.
    pub fn tick(&mut self, now: Duration) {
        if self.game_over {
            return;
        }
        if now.saturating_sub(self.last_spawn) > SPAWN_INTERVAL {
            if self.enemies.is_empty() || self.rng.gen_bool(RANDOM_SPAWN_CHANCE) {
                self.spawn_random();
            }
            self.last_spawn = now;
        }

        if self.enemies.is_empty() {
            self.player.level += 1;
            debug!(level = self.player.level, "Level up");
            self.spawn_wave(self.player.level);
        }
    }

    fn lose_life(&mut self) {
        if self.player.lose_life() {
            self.game_over = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn empty_game() -> Galaga<StdRng> {
        Galaga::empty(StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_new_game_spawns_first_wave() {
        let game = Galaga::new(StdRng::seed_from_u64(3));
        assert_eq!(game.enemies().len(), 7);
        assert_eq!(game.player().lives, INITIAL_LIVES);
        assert_eq!(game.player().level, 1);
        assert_eq!(game.player().y, PLAYER_ROW);
        for enemy in game.enemies() {
            assert!((2..FIELD_WIDTH - 2).contains(&enemy.x));
            assert!((1..5).contains(&enemy.y));
        }
    }

    #[test]
    fn test_wave_size_grows_with_level() {
        let mut game = empty_game();
        game.spawn_wave(3);
        assert_eq!(game.enemies().len(), 11);
    }

    #[test]
    fn test_player_bullet_kills_enemy_once() {
        for kind in EnemyKind::ALL {
            let mut game = empty_game();
            game.enemies_mut().push(Enemy::new(10, 5, kind));
            game.enemies_mut().push(Enemy::new(20, 5, EnemyKind::Basic));
            game.bullets_mut().push(Bullet::new(10, 5, Shooter::Player));
            game.bullets_mut().push(Bullet::new(10, 5, Shooter::Player));

            game.check_collisions();

            assert_eq!(game.player().score, kind.points());
            assert_eq!(game.enemies().len(), 1);
            assert_eq!(game.enemies()[0].x, 20);
            // The second bullet found nothing left to hit
            assert_eq!(game.bullets().len(), 1);
        }
    }

    #[test]
    fn test_enemy_bullet_on_last_life_ends_game() {
        let mut game = empty_game();
        game.player_mut().lives = 1;
        let (x, y) = (game.player().x, game.player().y);
        game.bullets_mut().push(Bullet::new(x, y, Shooter::Enemy));

        game.check_collisions();

        assert_eq!(game.player().lives, 0);
        assert!(game.is_game_over());
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_player_bullet_does_not_hurt_player() {
        let mut game = empty_game();
        let (x, y) = (game.player().x, game.player().y);
        game.bullets_mut().push(Bullet::new(x, y, Shooter::Player));
        game.check_collisions();
        assert_eq!(game.player().lives, INITIAL_LIVES);
        assert_eq!(game.bullets().len(), 1);
    }

    #[test]
    fn test_enemy_ramming_player_costs_life() {
        let mut game = empty_game();
        let (x, y) = (game.player().x, game.player().y);
        game.enemies_mut().push(Enemy::new(x, y, EnemyKind::Boss));

        game.check_collisions();

        assert!(game.enemies().is_empty());
        assert_eq!(game.player().lives, INITIAL_LIVES - 1);
        assert_eq!(game.player().score, 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_bullets_leave_field() {
        let mut game = empty_game();
        game.bullets_mut().push(Bullet::new(5, 0, Shooter::Player));
        game.bullets_mut().push(Bullet::new(6, FIELD_HEIGHT - 1, Shooter::Enemy));
        game.bullets_mut().push(Bullet::new(7, 10, Shooter::Player));

        game.update_bullets();

        assert_eq!(game.bullets(), &[Bullet::new(7, 9, Shooter::Player)]);
    }

    #[test]
    fn test_breaching_enemy_removed_and_costs_life() {
        let mut game = empty_game();
        game.enemies_mut().push(Enemy::new(10, BREACH_ROW, EnemyKind::Basic));
        game.enemies_mut().push(Enemy::new(12, 2, EnemyKind::Basic));

        game.update_enemies();

        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.player().lives, INITIAL_LIVES - 1);
        assert_eq!(game.player().score, 0);
    }

    #[test]
    fn test_enemy_drift_stays_in_bounds() {
        let mut game = empty_game();
        game.enemies_mut().push(Enemy::new(1, 2, EnemyKind::Basic));
        game.enemies_mut().push(Enemy::new(FIELD_WIDTH - 2, 2, EnemyKind::Basic));
        for _ in 0..300 {
            game.update_enemies();
            for enemy in game.enemies() {
                assert!((1..=FIELD_WIDTH - 2).contains(&enemy.x));
            }
        }
    }

    #[test]
    fn test_shot_cooldown() {
        let mut game = empty_game();
        assert!(game.try_shoot(Duration::ZERO));
        assert!(!game.try_shoot(Duration::from_millis(100)));
        assert!(!game.try_shoot(Duration::from_millis(200)));
        assert!(game.try_shoot(Duration::from_millis(201)));
        assert_eq!(game.bullets().len(), 2);

        let bullet = &game.bullets()[0];
        assert_eq!((bullet.x, bullet.y), (game.player().x, PLAYER_ROW - 1));
    }

    #[test]
    fn test_player_movement_clamped() {
        let mut game = empty_game();
        game.player_mut().x = 1;
        assert!(!game.move_player(-1));
        assert_eq!(game.player().x, 1);
        game.player_mut().x = FIELD_WIDTH - 2;
        assert!(!game.move_player(1));
        assert!(game.move_player(-1));
        assert_eq!(game.player().x, FIELD_WIDTH - 3);
    }

    #[test]
    fn test_clear_field_advances_level() {
        let mut game = empty_game();
        game.tick(Duration::from_millis(500));
        assert_eq!(game.player().level, 2);
        assert_eq!(game.enemies().len(), 9);
    }

    #[test]
    fn test_spawn_roll_on_empty_field() {
        let mut game = empty_game();
        game.tick(Duration::from_millis(2001));
        assert_eq!(game.player().level, 1);
        assert!((1..=3).contains(&game.enemies().len()));
        for enemy in game.enemies() {
            assert_eq!(enemy.y, 1);
            assert_ne!(enemy.kind, EnemyKind::Boss);
        }
    }

    #[test]
    fn test_seeded_games_replay_identically() {
        let mut a = Galaga::new(StdRng::seed_from_u64(99));
        let mut b = Galaga::new(StdRng::seed_from_u64(99));
        for i in 0..500u64 {
            let now = Duration::from_millis(i * 100);
            a.step();
            a.tick(now);
            b.step();
            b.tick(now);
        }
        assert_eq!(a.player(), b.player());
        assert_eq!(a.enemies(), b.enemies());
        assert_eq!(a.bullets(), b.bullets());
    }
}
