/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` plus the `GameConfig` it was built from and returns a brand-new
/// `GameState`.  Nothing here touches the terminal.

use log::debug;

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Hitbox, Laser, Ship, Side, Steer};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: both ships centred, full health, no lasers.
pub fn init_state(config: &GameConfig) -> GameState {
    let ship = |side: Side, y: f32| Ship {
        side,
        x: config.width / 2.0,
        y,
        vx: 0.0,
        health: config.max_health,
        alive: true,
    };
    GameState {
        blue: ship(Side::Blue, config.ship_offset_y),
        red: ship(Side::Red, config.height - config.ship_offset_y),
        lasers: Vec::new(),
        status: GameStatus::Playing,
        frame: 0,
        width: config.width,
        height: config.height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn steer_ship(state: &GameState, side: Side, steer: Steer, config: &GameConfig) -> GameState {
    let vx = match steer {
        Steer::Left => -config.ship_speed,
        Steer::Right => config.ship_speed,
        Steer::Stop => 0.0,
    };
    let mut next = state.clone();
    next.ship_mut(side).vx = vx;
    next
}

/// Fire a laser from the nose of `side`'s ship, unless the side is already
/// at `config.laser_cap` lasers in flight or the round is over.
pub fn fire_laser(state: &GameState, side: Side, config: &GameConfig) -> GameState {
    let ship = state.ship(side);
    if state.status != GameStatus::Playing || !ship.alive {
        return state.clone();
    }
    if let Some(cap) = config.laser_cap {
        if state.lasers_of(side) >= cap {
            debug!("{:?} fire rejected: {} lasers already in flight", side, cap);
            return state.clone();
        }
    }

    let direction = side.fire_direction();
    let laser = Laser {
        side,
        x: ship.x,
        y: ship.y + direction * config.muzzle_offset,
        vy: direction * config.laser_speed,
    };
    debug!("{:?} fired from x={}", side, laser.x);

    let mut lasers = state.lasers.clone();
    lasers.push(laser);
    GameState {
        lasers,
        ..state.clone()
    }
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

/// Clamp a ship's x into `[margin, width - margin]`.
pub fn clamp_x(x: f32, config: &GameConfig) -> f32 {
    x.clamp(config.ship_margin, config.width - config.ship_margin)
}

fn overlaps(laser: &Laser, laser_box: &Hitbox, ship: &Ship, ship_box: &Hitbox) -> bool {
    (laser.x - ship.x).abs() < laser_box.half_width + ship_box.half_width
        && (laser.y - ship.y).abs() < laser_box.half_height + ship_box.half_height
}

/// A laser is gone once its bottom edge leaves the vertical span of the world.
fn out_of_bounds(laser: &Laser, laser_box: &Hitbox, height: f32) -> bool {
    let bottom = laser.y - laser_box.half_height;
    bottom > height || bottom < 0.0
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Lasers are resolved in two phases: every laser that hit something or left
/// the screen is first marked, then all marked lasers are dropped in a single
/// compaction.  Blue's lasers are resolved before Red's, each in firing order,
/// so if both ships would fall on the same frame Blue takes the round.
pub fn tick(state: &GameState, config: &GameConfig) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Move ships, then clamp to the side margins ────────────────────────
    for side in [Side::Blue, Side::Red] {
        let ship = next.ship_mut(side);
        ship.x = clamp_x(ship.x + ship.vx, config);
    }

    // ── 2. Move lasers ───────────────────────────────────────────────────────
    for laser in &mut next.lasers {
        laser.y += laser.vy;
    }

    // ── 3. Mark lasers that hit the opposing ship ────────────────────────────
    let mut spent = vec![false; next.lasers.len()];

    for shooter in [Side::Blue, Side::Red] {
        let target_side = shooter.opponent();
        for (i, laser) in next.lasers.iter().enumerate() {
            if laser.side != shooter {
                continue;
            }
            let target = match target_side {
                Side::Blue => &mut next.blue,
                Side::Red => &mut next.red,
            };
            if !target.alive
                || !overlaps(laser, &config.laser_hitbox, target, &config.ship_hitbox)
            {
                continue;
            }

            spent[i] = true;
            if next.status != GameStatus::Playing {
                // The round is already decided; the laser still vanishes.
                continue;
            }
            target.health = target.health.saturating_sub(1);
            debug!("{:?} hit {:?}, health now {}", shooter, target_side, target.health);
            if target.health == 0 {
                target.alive = false;
                next.status = GameStatus::Won(shooter);
            }
        }
    }

    // ── 4. Mark lasers that left the screen ──────────────────────────────────
    for (i, laser) in next.lasers.iter().enumerate() {
        if out_of_bounds(laser, &config.laser_hitbox, next.height) {
            spent[i] = true;
        }
    }

    // ── 5. Compact ───────────────────────────────────────────────────────────
    let mut marks = spent.into_iter();
    next.lasers.retain(|_| !marks.next().unwrap_or(false));

    next
}
