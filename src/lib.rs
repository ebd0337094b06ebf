//! Skyguard - A missile-command style defense game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, waves, game loop)
//! - `settings`: Data-driven game balance and viewport configuration

pub mod settings;
pub mod sim;

pub use settings::{PlayerStats, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed tick period in milliseconds (integer, like the frame timer)
    pub const TICK_MS: u32 = 1000 / SIM_HZ;

    /// Default viewport dimensions
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

    /// Cannon hitbox (anchored above its base-center)
    pub const CANNON_WIDTH: f32 = 60.0;
    pub const CANNON_HEIGHT: f32 = 20.0;
    /// Cannon horizontal anchors as fractions of viewport width
    pub const CANNON_ANCHORS: [f32; 3] = [0.15, 0.50, 0.85];
    /// Time a destroyed cannon stays down
    pub const RESPAWN_TIME_MS: u32 = 5000;
    /// Last-fire time of a fresh cannon, so it can fire immediately
    pub const CANNON_INITIAL_LAST_FIRE_MS: i64 = -1000;

    /// Building footprint
    pub const BUILDING_WIDTH: f32 = 40.0;
    pub const BUILDING_HEIGHT: f32 = 60.0;
    /// Buildings packed between each pair of neighbouring cannons
    pub const BUILDINGS_PER_ZONE: usize = 3;

    /// Enemy missile square hitbox edge
    pub const MISSILE_HITBOX_SIZE: f32 = 10.0;
    /// Distance along a fan direction used to place a fired missile's target
    pub const FAN_TARGET_DISTANCE: f32 = 1000.0;

    /// Special enemies leave the playfield outside this horizontal band
    pub const ENEMY_MIN_X: f32 = -200.0;
    pub const ENEMY_MAX_X: f32 = 1500.0;
    /// Special enemies enter this far outside the viewport edge
    pub const ENEMY_ENTRY_MARGIN: f32 = 50.0;

    /// Item square hitbox edge
    pub const ITEM_SIZE: f32 = 40.0;
    /// Item horizontal speed (pixels per tick)
    pub const ITEM_SPEED: f32 = 2.0;
    /// Items enter this far outside the viewport edge
    pub const ITEM_ENTRY_MARGIN: f32 = 50.0;
    /// Items are dropped once this far outside the viewport edge
    pub const ITEM_EXIT_MARGIN: f32 = 100.0;
    /// Vertical band items fly through
    pub const ITEM_MIN_Y: f32 = 400.0;
    pub const ITEM_Y_RANGE: u32 = 200;

    /// Score per intercepted missile
    pub const MISSILE_KILL_SCORE: u64 = 20;

    /// Floating text lifetime in frames
    pub const FLOATING_TEXT_FRAMES: u32 = 60;

    /// Spawn interval jitter is uniform in [MIN, MIN + SPAN)
    pub const SPAWN_JITTER_MIN: f32 = 0.8;
    pub const SPAWN_JITTER_SPAN: f32 = 0.4;
}

/// Unit direction `degrees` away from straight down (+y is down)
///
/// Positive angles lean toward +x, so a symmetric fan like [-15, 0, 15]
/// spreads evenly around the vertical.
#[inline]
pub fn fan_direction(degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(theta.sin(), theta.cos())
}

/// Unit vector from `from` toward `to` (zero if they coincide)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_direction() {
        let down = fan_direction(0.0);
        assert!((down - Vec2::new(0.0, 1.0)).length() < 1e-6);

        let right = fan_direction(90.0);
        assert!((right - Vec2::new(1.0, 0.0)).length() < 1e-6);

        let left = fan_direction(-15.0);
        let right = fan_direction(15.0);
        assert!((left.x + right.x).abs() < 1e-6);
        assert!((left.y - right.y).abs() < 1e-6);
    }

    #[test]
    fn test_direction_to() {
        let d = direction_to(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(direction_to(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }
}
