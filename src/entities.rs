/// All game entity types — pure data, no logic.

use serde::Deserialize;

// ── Sides ─────────────────────────────────────────────────────────────────────

/// The two players.  Blue sits at the bottom and fires upward, Red sits at
/// the top and fires downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Name shown on the game-over screen.
    pub fn label(self) -> &'static str {
        match self {
            Side::Blue => "BLUE PLAYER",
            Side::Red => "RED PLAYER",
        }
    }

    /// Sign of this side's laser velocity along the world y axis (y grows upward).
    pub fn fire_direction(self) -> f32 {
        match self {
            Side::Blue => 1.0,
            Side::Red => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won(Side),
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned hitbox, stored as half extents around an entity's centre.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Hitbox {
    pub half_width: f32,
    pub half_height: f32,
}

// ── Ships & lasers ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub side: Side,
    /// Centre, in world units.
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity applied every frame.
    pub vx: f32,
    pub health: u32,
    /// Cleared when health runs out; a dead ship can no longer be hit.
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    /// Fixed vertical velocity; the sign follows the owning side.
    pub vy: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the game screen owns.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub blue: Ship,
    pub red: Ship,
    /// Lasers of both sides, in firing order.
    pub lasers: Vec<Laser>,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn ship(&self, side: Side) -> &Ship {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    pub fn ship_mut(&mut self, side: Side) -> &mut Ship {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }

    /// Number of lasers currently in flight for `side`.
    pub fn lasers_of(&self, side: Side) -> usize {
        self.lasers.iter().filter(|l| l.side == side).count()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Won(side) => Some(side),
            GameStatus::Playing => None,
        }
    }
}
