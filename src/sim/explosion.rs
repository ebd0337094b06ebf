//! Expanding blast rings

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What produced an explosion; fixes its size and growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// A player shell reaching its target (size from player stats)
    Player,
    /// Secondary blast when a special enemy is shot down
    EnemyKill,
    /// A missile hitting a building
    BuildingImpact,
    /// A missile hitting a cannon
    CannonImpact,
}

impl ExplosionKind {
    /// (max radius, growth per tick) for the fixed-size kinds
    pub fn fixed_profile(self) -> Option<(f32, f32)> {
        match self {
            ExplosionKind::Player => None,
            ExplosionKind::EnemyKill => Some((40.0, 3.0)),
            ExplosionKind::BuildingImpact => Some((20.0, 2.0)),
            ExplosionKind::CannonImpact => Some((30.0, 2.0)),
        }
    }
}

/// An explosion whose radius grows linearly until it reaches its maximum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth_rate: f32,
    pub alive: bool,
}

impl Explosion {
    pub fn new(kind: ExplosionKind, center: Vec2, max_radius: f32, growth_rate: f32) -> Self {
        Self {
            kind,
            center,
            radius: 0.0,
            max_radius,
            growth_rate,
            alive: true,
        }
    }

    /// Explosion of one of the fixed-size kinds
    ///
    /// `Player` has no fixed profile; callers build it with [`Explosion::new`].
    pub fn fixed(kind: ExplosionKind, center: Vec2) -> Self {
        let (max_radius, growth_rate) = kind.fixed_profile().unwrap_or((0.0, 0.0));
        Self::new(kind, center, max_radius, growth_rate)
    }

    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.radius += self.growth_rate;
        if self.radius >= self.max_radius {
            self.alive = false;
        }
    }

    /// Growth progress in [0, 1] for rendering
    pub fn progress(&self) -> f32 {
        if self.max_radius <= 0.0 {
            return 1.0;
        }
        (self.radius / self.max_radius).clamp(0.0, 1.0)
    }
}
