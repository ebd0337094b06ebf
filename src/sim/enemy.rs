//! Special enemies: flying attackers with their own fire patterns
//!
//! Behaviour differences between kinds live in [`EnemyProfile`] data, so the
//! update logic is one path for every kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::projectile::EnemyMissile;
use super::rng::RandomSource;
use crate::consts::*;
use crate::fan_direction;

/// Special enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Crosses the sky dropping single missiles straight down
    VerticalBomber,
    /// Hovers at the top center firing three-way fans
    TripleBoss,
    /// Crosses once, releasing a single five-way burst mid-screen
    BurstBomber,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [
        EnemyKind::VerticalBomber,
        EnemyKind::TripleBoss,
        EnemyKind::BurstBomber,
    ];

    /// Map a roll in [0, 3) to a kind
    pub fn from_roll(roll: u32) -> Self {
        Self::ALL[roll as usize % Self::ALL.len()]
    }

    pub fn profile(self) -> &'static EnemyProfile {
        match self {
            EnemyKind::VerticalBomber => &VERTICAL_BOMBER,
            EnemyKind::TripleBoss => &TRIPLE_BOSS,
            EnemyKind::BurstBomber => &BURST_BOMBER,
        }
    }

    /// Score for shooting one down
    pub fn kill_score(self) -> u64 {
        match self {
            EnemyKind::TripleBoss => 500,
            _ => 100,
        }
    }
}

/// When an enemy releases its fan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireRule {
    /// Every `interval_ms`, resetting the fire timer
    Periodic { interval_ms: u32 },
    /// Exactly once, the first time x is strictly inside (min_x, max_x)
    OnceInBand { min_x: f32, max_x: f32 },
}

/// Where an enemy appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// Just outside a random side edge, flying inward
    FromSide { y: f32 },
    /// Stationary at the horizontal center
    Centered { y: f32 },
}

/// Per-kind behaviour table
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProfile {
    pub entry: Entry,
    /// Horizontal speed magnitude (pixels per tick)
    pub speed: f32,
    pub hit_points: u32,
    pub fire_rule: FireRule,
    /// Fan angles in degrees from straight down
    pub fan_degrees: &'static [f32],
    /// Speed of every missile in the fan
    pub missile_speed: f32,
    pub size: Vec2,
}

pub static VERTICAL_BOMBER: EnemyProfile = EnemyProfile {
    entry: Entry::FromSide { y: 60.0 },
    speed: 3.0,
    hit_points: 1,
    fire_rule: FireRule::Periodic { interval_ms: 1500 },
    fan_degrees: &[0.0],
    missile_speed: 3.0,
    size: Vec2::new(40.0, 30.0),
};

pub static TRIPLE_BOSS: EnemyProfile = EnemyProfile {
    entry: Entry::Centered { y: 80.0 },
    speed: 0.0,
    hit_points: 10,
    fire_rule: FireRule::Periodic { interval_ms: 1000 },
    fan_degrees: &[-15.0, 0.0, 15.0],
    missile_speed: 6.0,
    size: Vec2::new(40.0, 30.0),
};

pub static BURST_BOMBER: EnemyProfile = EnemyProfile {
    entry: Entry::FromSide { y: 100.0 },
    speed: 4.0,
    hit_points: 2,
    fire_rule: FireRule::OnceInBand {
        min_x: 200.0,
        max_x: 1080.0,
    },
    fan_degrees: &[-10.0, -5.0, 0.0, 5.0, 10.0],
    missile_speed: 4.0,
    size: Vec2::new(40.0, 30.0),
};

/// A special enemy in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: u32,
    /// Time accumulated since the last periodic shot
    pub fire_timer_ms: u32,
    /// One-shot guard for `OnceInBand`
    pub has_fired: bool,
    pub alive: bool,
}

impl Enemy {
    /// Spawn an enemy for a viewport of the given width
    ///
    /// Side entries draw one float to pick the side.
    pub fn spawn(kind: EnemyKind, viewport_width: f32, rng: &mut impl RandomSource) -> Self {
        let profile = kind.profile();
        let (pos, vel) = match profile.entry {
            Entry::FromSide { y } => {
                if rng.next_f32() < 0.5 {
                    (Vec2::new(-ENEMY_ENTRY_MARGIN, y), Vec2::new(profile.speed, 0.0))
                } else {
                    (
                        Vec2::new(viewport_width + ENEMY_ENTRY_MARGIN, y),
                        Vec2::new(-profile.speed, 0.0),
                    )
                }
            }
            Entry::Centered { y } => (Vec2::new(viewport_width / 2.0, y), Vec2::ZERO),
        };
        Self::new(kind, pos, vel)
    }

    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel,
            hp: kind.profile().hit_points,
            fire_timer_ms: 0,
            has_fired: false,
            alive: true,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.pos, self.kind.profile().size)
    }

    /// Move, fire if due, and leave the field when out of bounds
    ///
    /// Returns the missiles released this tick.
    pub fn update(&mut self, dt_ms: u32) -> Vec<EnemyMissile> {
        if !self.alive {
            return Vec::new();
        }

        self.pos += self.vel;
        self.fire_timer_ms = self.fire_timer_ms.saturating_add(dt_ms);

        let profile = self.kind.profile();
        let fire = match profile.fire_rule {
            FireRule::Periodic { interval_ms } => {
                if self.fire_timer_ms >= interval_ms {
                    self.fire_timer_ms = 0;
                    true
                } else {
                    false
                }
            }
            FireRule::OnceInBand { min_x, max_x } => {
                if !self.has_fired && self.pos.x > min_x && self.pos.x < max_x {
                    self.has_fired = true;
                    true
                } else {
                    false
                }
            }
        };

        let missiles = if fire { self.fan() } else { Vec::new() };

        if self.pos.x < ENEMY_MIN_X || self.pos.x > ENEMY_MAX_X {
            self.alive = false;
        }

        missiles
    }

    /// The fan of missiles for this kind, launched from the current position
    pub fn fan(&self) -> Vec<EnemyMissile> {
        let profile = self.kind.profile();
        profile
            .fan_degrees
            .iter()
            .map(|&deg| {
                let dir = fan_direction(deg);
                EnemyMissile::launched(
                    self.pos,
                    dir,
                    self.pos + dir * FAN_TARGET_DISTANCE,
                    profile.missile_speed,
                )
            })
            .collect()
    }

    /// Lose one hit point; dies at zero
    pub fn take_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.alive = false;
        }
    }
}
