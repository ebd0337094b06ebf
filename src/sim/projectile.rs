//! Straight-line flyers: player projectiles and enemy missiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, passed_target};
use crate::consts::MISSILE_HITBOX_SIZE;
use crate::direction_to;

/// Straight flight from `start` toward `target` at constant speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub start: Vec2,
    pub current: Vec2,
    pub target: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Pixels per tick
    pub speed: f32,
}

impl Trajectory {
    /// Aim from `start` at `target`
    pub fn toward(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self::along(start, direction_to(start, target), target, speed)
    }

    /// Fly along an explicit direction with a given target
    pub fn along(start: Vec2, direction: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            start,
            current: start,
            target,
            direction,
            speed,
        }
    }

    /// Move one tick; returns true once the target has been passed
    pub fn advance(&mut self) -> bool {
        self.current += self.direction * self.speed;
        self.passed_target()
    }

    /// The termination test: progress along the direction, not proximity
    ///
    /// A trajectory launched at its own start point has no direction and
    /// counts as arrived.
    #[inline]
    pub fn passed_target(&self) -> bool {
        self.direction == Vec2::ZERO || passed_target(self.current, self.target, self.direction)
    }
}

/// A player shell flying to the clicked point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProjectile {
    pub trajectory: Trajectory,
    pub alive: bool,
}

impl PlayerProjectile {
    pub fn new(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            trajectory: Trajectory::toward(start, target, speed),
            alive: true,
        }
    }

    /// Advance; dies when the target point is passed
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        if self.trajectory.advance() {
            self.alive = false;
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.trajectory.current
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.trajectory.target
    }
}

/// A hostile missile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMissile {
    pub trajectory: Trajectory,
    pub alive: bool,
}

impl EnemyMissile {
    /// Missile aimed at a point
    pub fn aimed(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            trajectory: Trajectory::toward(start, target, speed),
            alive: true,
        }
    }

    /// Missile launched along a fixed direction
    pub fn launched(start: Vec2, direction: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            trajectory: Trajectory::along(start, direction, target, speed),
            alive: true,
        }
    }

    /// Advance; a missile that passes its target without hitting anything
    /// just fizzles
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        if self.trajectory.advance() {
            self.alive = false;
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.trajectory.current
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.pos(), Vec2::splat(MISSILE_HITBOX_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_dies_after_passing_target() {
        let mut p = PlayerProjectile::new(Vec2::new(0.0, 100.0), Vec2::new(0.0, 76.0), 8.0);
        p.update();
        assert!(p.alive); // y = 92
        p.update();
        assert!(p.alive); // y = 84
        p.update();
        assert!(p.alive); // y = 76, on target but not past it
        p.update();
        assert!(!p.alive); // y = 68
        assert_eq!(p.target(), Vec2::new(0.0, 76.0));
    }

    #[test]
    fn test_dead_projectile_does_not_move() {
        let mut p = PlayerProjectile::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 8.0);
        p.update();
        assert!(!p.alive);
        let pos = p.pos();
        p.update();
        assert_eq!(p.pos(), pos);
    }

    #[test]
    fn test_projectile_fired_at_its_start_arrives_at_once() {
        let start = Vec2::new(120.0, 770.0);
        let mut p = PlayerProjectile::new(start, start, 8.0);
        assert_eq!(p.trajectory.direction, Vec2::ZERO);
        p.update();
        assert!(!p.alive);
        assert_eq!(p.pos(), start);
    }

    #[test]
    fn test_missile_direction_is_unit() {
        let m = EnemyMissile::aimed(Vec2::new(10.0, 0.0), Vec2::new(310.0, 400.0), 3.0);
        assert!((m.trajectory.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(m.trajectory.start, m.pos());
    }

    #[test]
    fn test_missile_hitbox_centered() {
        let m = EnemyMissile::aimed(Vec2::new(50.0, 50.0), Vec2::new(50.0, 500.0), 3.0);
        let hb = m.hitbox();
        assert_eq!(hb.center(), Vec2::new(50.0, 50.0));
        assert_eq!(hb.width(), MISSILE_HITBOX_SIZE);
    }
}
