//! Shooter entities: player, bullets, enemies

/// Enemy tiers with their glyph and point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// `*` - 100 pts
    Basic,
    /// `#` - 200 pts
    Strong,
    /// `@` - 500 pts
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Strong, EnemyKind::Boss];

    /// Point value for destroying this enemy
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Basic => 100,
            EnemyKind::Strong => 200,
            EnemyKind::Boss => 500,
        }
    }

    /// Glyph drawn for this enemy
    pub fn glyph(self) -> char {
        match self {
            EnemyKind::Basic => '*',
            EnemyKind::Strong => '#',
            EnemyKind::Boss => '@',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(x: i32, y: i32, kind: EnemyKind) -> Self {
        Self { x, y, kind }
    }
}

/// Who fired a bullet, which also fixes its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    /// Travels up
    Player,
    /// Travels down
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub shooter: Shooter,
}

impl Bullet {
    pub fn new(x: i32, y: i32, shooter: Shooter) -> Self {
        Self { x, y, shooter }
    }

    /// Advance one row in the bullet's direction
    pub fn advance(&mut self) {
        match self.shooter {
            Shooter::Player => self.y -= 1,
            Shooter::Enemy => self.y += 1,
        }
    }

    /// Whether the bullet is still inside `[0, height)` vertically
    pub fn in_bounds(&self, height: i32) -> bool {
        match self.shooter {
            Shooter::Player => self.y >= 0,
            Shooter::Enemy => self.y < height,
        }
    }
}

/// Player ship. The row is fixed; only `x` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: u32,
    pub score: u32,
    pub level: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, lives: u32) -> Self {
        Self {
            x,
            y,
            lives,
            score: 0,
            level: 1,
        }
    }

    /// Take one life. Returns `true` when no lives are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}
